//! Partition of assets by orientation.

use catalog::{Asset, Orientation};

/// Assets split into landscape and portrait, each in input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrientationSplit {
    pub landscape: Vec<Asset>,
    pub portrait: Vec<Asset>,
}

impl OrientationSplit {
    pub fn len(&self) -> usize {
        self.landscape.len() + self.portrait.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split assets into landscape (wider than tall) and portrait (everything
/// else). Every input asset lands in exactly one side.
pub fn split_by_orientation(assets: Vec<Asset>) -> OrientationSplit {
    let (landscape, portrait) = assets
        .into_iter()
        .partition(|asset| asset.orientation() == Orientation::Landscape);
    OrientationSplit {
        landscape,
        portrait,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_preserves_order_and_count() {
        let assets = vec![
            Asset::new("l1", 400, 300),
            Asset::new("p1", 300, 400),
            Asset::new("sq", 300, 300),
            Asset::new("l2", 1920, 1080),
        ];

        let split = split_by_orientation(assets);

        let landscape: Vec<&str> = split.landscape.iter().map(|a| a.id.as_str()).collect();
        let portrait: Vec<&str> = split.portrait.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(landscape, vec!["l1", "l2"]);
        assert_eq!(portrait, vec!["p1", "sq"]);
        assert_eq!(split.len(), 4);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_by_orientation(Vec::new()).is_empty());
    }
}
