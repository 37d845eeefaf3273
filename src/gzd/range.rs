use crate::gzd::grid_zone::GridZone;

/// Grid zones intersecting a query box, ordered by zone number then band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridRange {
    zones: Vec<GridZone>,
}

impl GridRange {
    pub(crate) fn new(zones: Vec<GridZone>) -> Self {
        Self { zones }
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zones(&self) -> &[GridZone] {
        &self.zones
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridZone> {
        self.zones.iter()
    }

    pub fn filter<F>(&self, predicate: F) -> Vec<&GridZone>
    where
        F: Fn(&GridZone) -> bool,
    {
        self.zones.iter().filter(|zone| predicate(zone)).collect()
    }
}

impl IntoIterator for GridRange {
    type Item = GridZone;
    type IntoIter = std::vec::IntoIter<GridZone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.into_iter()
    }
}

impl<'a> IntoIterator for &'a GridRange {
    type Item = &'a GridZone;
    type IntoIter = std::slice::Iter<'a, GridZone>;

    fn into_iter(self) -> Self::IntoIter {
        self.zones.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::gzd::zones::grid_range;
    use crate::util::bounds::Bounds;
    use crate::util::error::MgrsError;

    #[test]
    fn test_range_iteration() -> Result<(), MgrsError> {
        let range = grid_range(&Bounds::degrees(0.0, 50.0, 13.0, 62.0))?;

        let mut count = 0;
        for zone in &range {
            assert!(zone.bounds().intersects(&Bounds::degrees(0.0, 50.0, 13.0, 62.0)));
            count += 1;
        }
        assert_eq!(count, range.len());

        let owned: Vec<String> = range.clone().into_iter().map(|z| z.name()).collect();
        assert!(owned.contains(&"32V".to_string()));
        assert!(owned.contains(&"31U".to_string()));
        Ok(())
    }

    #[test]
    fn test_range_filter() -> Result<(), MgrsError> {
        let range = grid_range(&Bounds::degrees(0.0, 50.0, 13.0, 62.0))?;
        let irregular = range.filter(|z| z.is_irregular());
        let names: Vec<String> = irregular.iter().map(|z| z.name()).collect();
        assert_eq!(names, vec!["31V", "32V"]);
        Ok(())
    }

    #[test]
    fn test_empty_range() -> Result<(), MgrsError> {
        let range = grid_range(&Bounds::degrees(0.0, -90.0, 1.0, -85.0))?;
        assert!(range.is_empty());
        assert_eq!(range.iter().count(), 0);
        Ok(())
    }
}
