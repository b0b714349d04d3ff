use std::fmt;

/// Fixed backend routes. Paths are not configurable at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Household count inside a WKT polygon.
    HouseholdsArea,
    /// Population inside a WKT polygon.
    PopulationArea,
    /// Household count within a radius of a point.
    HouseholdsPoint,
    /// Population within a radius of a point.
    PopulationPoint,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::HouseholdsArea => "/households/area",
            Endpoint::PopulationArea => "/population/area",
            Endpoint::HouseholdsPoint => "/households/point",
            Endpoint::PopulationPoint => "/population/point",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Endpoint; 4] = [
        Endpoint::HouseholdsArea,
        Endpoint::PopulationArea,
        Endpoint::HouseholdsPoint,
        Endpoint::PopulationPoint,
    ];

    #[test]
    fn paths_are_distinct_and_rooted() {
        let mut paths: Vec<&str> = ALL.iter().map(|e| e.path()).collect();
        assert!(paths.iter().all(|p| p.starts_with('/')));
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), ALL.len());
    }

    #[test]
    fn display_is_the_path() {
        assert_eq!(Endpoint::PopulationArea.to_string(), "/population/area");
    }
}
