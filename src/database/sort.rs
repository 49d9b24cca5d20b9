use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SortError {
    #[error("Invalid sort_by '{0}': expected one of id, title, rating, release_date")]
    InvalidColumn(String),

    #[error("Invalid sort_order '{0}': expected asc or desc")]
    InvalidDirection(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Movie columns a listing may be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieSortColumn {
    Id,
    Title,
    Rating,
    ReleaseDate,
}

impl MovieSortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieSortColumn::Id => "id",
            MovieSortColumn::Title => "title",
            MovieSortColumn::Rating => "rating",
            MovieSortColumn::ReleaseDate => "release_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovieSort {
    pub column: MovieSortColumn,
    pub direction: SortDirection,
}

impl Default for MovieSort {
    fn default() -> Self {
        Self {
            column: MovieSortColumn::Rating,
            direction: SortDirection::Desc,
        }
    }
}

impl MovieSort {
    /// Absent or blank parameters fall back to `rating desc`.
    pub fn parse(sort_by: Option<&str>, sort_order: Option<&str>) -> Result<Self, SortError> {
        let defaults = Self::default();

        let column = match sort_by.map(str::trim).filter(|s| !s.is_empty()) {
            None => defaults.column,
            Some(s) => match s.to_ascii_lowercase().as_str() {
                "id" => MovieSortColumn::Id,
                "title" => MovieSortColumn::Title,
                "rating" => MovieSortColumn::Rating,
                "release_date" => MovieSortColumn::ReleaseDate,
                _ => return Err(SortError::InvalidColumn(s.to_string())),
            },
        };

        let direction = match sort_order.map(str::trim).filter(|s| !s.is_empty()) {
            None => defaults.direction,
            Some(s) if s.eq_ignore_ascii_case("asc") => SortDirection::Asc,
            Some(s) if s.eq_ignore_ascii_case("desc") => SortDirection::Desc,
            Some(s) => return Err(SortError::InvalidDirection(s.to_string())),
        };

        Ok(Self { column, direction })
    }

    /// ORDER BY terms for a query aliasing `movie` as `alias`; movie id breaks ties.
    pub fn order_terms(&self, alias: &str) -> String {
        format!(
            "{alias}.{} {}, {alias}.id ASC",
            self.column.as_str(),
            self.direction.to_sql()
        )
    }
}
