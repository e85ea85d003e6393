//! Filter restricting the collection to a single album.

use crate::traits::Filter;
use catalog::Asset;

/// Keeps only assets tagged with the configured album name.
pub struct AlbumFilter {
    album: String,
}

impl AlbumFilter {
    pub fn new(album: impl Into<String>) -> Self {
        Self {
            album: album.into(),
        }
    }
}

impl Filter for AlbumFilter {
    fn name(&self) -> &str {
        "AlbumFilter"
    }

    fn apply(&self, assets: Vec<Asset>) -> Vec<Asset> {
        assets
            .into_iter()
            .filter(|asset| asset.album.as_deref() == Some(self.album.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_album_filter() {
        let assets = vec![
            Asset::new("1", 4, 3).with_album("Picture Frame"),
            Asset::new("2", 4, 3).with_album("Holidays"),
            Asset::new("3", 4, 3),
            Asset::new("4", 3, 4).with_album("Picture Frame"),
        ];

        let filtered = AlbumFilter::new("Picture Frame").apply(assets);

        let ids: Vec<&str> = filtered.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }
}
