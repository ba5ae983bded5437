use crate::error::{Error, Result};
use crate::estimator::BlockMatcher;

pub const DEFAULT_WINDOW_RADIUS: u32 = 5;
pub const DEFAULT_SEARCH_PROPORTION: f64 = 0.15625;

/// Parameters shared by the whole run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Half side of the square patch; the patch is `2 * r + 1` pixels wide.
    pub window_radius: u32,
    /// Fraction of the image width used as the maximum disparity.
    pub search_proportion: f64,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            window_radius: DEFAULT_WINDOW_RADIUS,
            search_proportion: DEFAULT_SEARCH_PROPORTION,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_window_radius(mut self, radius: u32) -> Self {
        self.window_radius = radius;
        self
    }

    pub fn with_search_proportion(mut self, proportion: f64) -> Self {
        self.search_proportion = proportion;
        self
    }

    /// `round(search_proportion * width)`. Must come out positive.
    pub fn search_distance(&self, width: u32) -> Result<u32> {
        let p = self.search_proportion;
        if !p.is_finite() || p <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "search proportion must be a positive number, got {}",
                p
            )));
        }
        let distance = (p * width as f64).round();
        if distance < 1.0 {
            return Err(Error::InvalidConfiguration(format!(
                "search distance rounds to 0 for width {} and proportion {}",
                width, p
            )));
        }
        if distance > u32::MAX as f64 {
            return Err(Error::InvalidConfiguration(format!(
                "search distance {} is too large",
                distance
            )));
        }
        Ok(distance as u32)
    }

    /// A matcher for images `width` pixels wide.
    pub fn matcher_for(&self, width: u32) -> Result<BlockMatcher> {
        let search_distance = self.search_distance(width)?;
        Ok(BlockMatcher::new(search_distance).with_window_radius(self.window_radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MatchConfig::default();
        assert_eq!(config.window_radius, 5);
        assert_eq!(config.search_proportion, 0.15625);
        assert_eq!(config, MatchConfig::new());
    }

    #[test]
    fn test_search_distance_rounds() {
        let config = MatchConfig::default();
        assert_eq!(config.search_distance(64).unwrap(), 10);
        // 100 * 0.15625 = 15.625
        assert_eq!(config.search_distance(100).unwrap(), 16);
        // 4 * 0.15625 = 0.625
        assert_eq!(config.search_distance(4).unwrap(), 1);
    }

    #[test]
    fn test_zero_search_distance_rejected() {
        let config = MatchConfig::default();
        // 3 * 0.15625 = 0.46875
        assert!(matches!(
            config.search_distance(3),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            config.search_distance(0),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_bad_proportion_rejected() {
        for &p in [0.0, -0.5, f64::NAN, f64::INFINITY].iter() {
            let config = MatchConfig::default().with_search_proportion(p);
            assert!(matches!(
                config.search_distance(640),
                Err(Error::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_matcher_for() {
        let matcher = MatchConfig::new()
            .with_window_radius(2)
            .with_search_proportion(0.25)
            .matcher_for(40)
            .unwrap();
        assert_eq!(matcher.window_radius, 2);
        assert_eq!(matcher.search_distance, 10);
    }
}
