use serde::{Deserialize, Serialize};

use super::Review;

/// A catalogue entry. Field names follow the stored JSON documents.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Movie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Poster", default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

impl Movie {
    /// Mean of all review rates, `None` when the movie has no reviews.
    pub fn mean_rating(&self) -> Option<f64> {
        match self.reviews.as_deref() {
            Some(reviews) if !reviews.is_empty() => {
                let total: f64 = reviews.iter().map(|review| review.rate).sum();
                Some(total / reviews.len() as f64)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMovie {
    pub title: String,
    pub year: String,
    pub kind: String,
    pub poster: Option<String>,
}

/// Editable catalogue fields. `imdbID` and `reviews` are not part of a patch.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePatch {
    pub title: String,
    pub year: String,
    pub kind: String,
    pub poster: Option<String>,
}

impl MoviePatch {
    pub fn apply(self, movie: &mut Movie) {
        movie.title = self.title;
        movie.year = self.year;
        movie.kind = self.kind;
        if let Some(poster) = self.poster {
            movie.poster = Some(poster);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaFilter {
    pub search: Option<String>,
    pub year: Option<String>,
    pub kind: Option<String>,
}

impl MediaFilter {
    /// Only one criterion applies: title search, then year, then type.
    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(search) = non_empty(&self.search) {
            contains_ignore_case(&movie.title, search)
        } else if let Some(year) = non_empty(&self.year) {
            movie.year.contains(year)
        } else if let Some(kind) = non_empty(&self.kind) {
            contains_ignore_case(&movie.kind, kind)
        } else {
            true
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
