//! Name-keyed selection of acceleration models per body pair.

use tracing::debug;

use crate::settings::AccelerationSettings;

#[derive(Debug, Clone, Default)]
struct ExertingEntry {
    exerting: String,
    accelerations: Vec<AccelerationSettings>,
}

#[derive(Debug, Clone, Default)]
struct UndergoingEntry {
    undergoing: String,
    exerting: Vec<ExertingEntry>,
}

/// Accelerations selected by the user: undergoing body → exerting body →
/// ordered acceleration list. Bodies keep their first-insertion order and
/// acceleration lists only ever grow.
#[derive(Debug, Clone, Default)]
pub struct SelectedAccelerationMap {
    entries: Vec<UndergoingEntry>,
}

impl SelectedAccelerationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `settings` to the list acting on `undergoing` due to `exerting`.
    pub fn add(
        &mut self,
        undergoing: impl Into<String>,
        exerting: impl Into<String>,
        settings: AccelerationSettings,
    ) -> &mut Self {
        let undergoing = undergoing.into();
        let exerting = exerting.into();
        debug!(
            undergoing = %undergoing,
            exerting = %exerting,
            kind = %settings.kind(),
            "selecting acceleration"
        );
        self.slot(undergoing, exerting).push(settings);
        self
    }

    /// Append several accelerations for one pair, preserving their order.
    pub fn extend<I>(
        &mut self,
        undergoing: impl Into<String>,
        exerting: impl Into<String>,
        settings: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = AccelerationSettings>,
    {
        let undergoing = undergoing.into();
        let exerting = exerting.into();
        for item in settings {
            self.add(undergoing.clone(), exerting.clone(), item);
        }
        self
    }

    fn slot(&mut self, undergoing: String, exerting: String) -> &mut Vec<AccelerationSettings> {
        let u = match self.entries.iter().position(|e| e.undergoing == undergoing) {
            Some(u) => u,
            None => {
                self.entries.push(UndergoingEntry {
                    undergoing,
                    exerting: Vec::new(),
                });
                self.entries.len() - 1
            }
        };
        let exerting_entries = &mut self.entries[u].exerting;
        let e = match exerting_entries.iter().position(|e| e.exerting == exerting) {
            Some(e) => e,
            None => {
                exerting_entries.push(ExertingEntry {
                    exerting,
                    accelerations: Vec::new(),
                });
                exerting_entries.len() - 1
            }
        };
        &mut exerting_entries[e].accelerations
    }

    /// Accelerations acting on `undergoing` due to `exerting`, in insertion order.
    pub fn get(&self, undergoing: &str, exerting: &str) -> &[AccelerationSettings] {
        self.entries
            .iter()
            .find(|e| e.undergoing == undergoing)
            .and_then(|u| u.exerting.iter().find(|e| e.exerting == exerting))
            .map(|e| e.accelerations.as_slice())
            .unwrap_or(&[])
    }

    /// `(undergoing, exerting, accelerations)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &[AccelerationSettings])> {
        self.entries.iter().flat_map(|u| {
            u.exerting.iter().map(move |e| {
                (
                    u.undergoing.as_str(),
                    e.exerting.as_str(),
                    e.accelerations.as_slice(),
                )
            })
        })
    }

    pub fn bodies_undergoing(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.undergoing.as_str())
    }

    /// Total number of acceleration terms.
    pub fn len(&self) -> usize {
        self.iter().map(|(_, _, list)| list.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_pair_accumulates_in_insertion_order() {
        let mut map = SelectedAccelerationMap::new();
        map.add("Vehicle", "Earth", AccelerationSettings::spherical_harmonic_gravity(4, 4).unwrap());
        map.add("Vehicle", "Earth", AccelerationSettings::aerodynamic());
        let list = map.get("Vehicle", "Earth");
        assert_eq!(list.len(), 2);
        assert!(matches!(list[0], AccelerationSettings::SphericalHarmonicGravity { .. }));
        assert_eq!(list[1], AccelerationSettings::Aerodynamic);
    }

    #[test]
    fn iteration_follows_first_insertion() {
        let mut map = SelectedAccelerationMap::new();
        map.add("Vehicle", "Sun", AccelerationSettings::point_mass_gravity())
            .add("Vehicle", "Earth", AccelerationSettings::point_mass_gravity())
            .add("Moon", "Earth", AccelerationSettings::point_mass_gravity())
            .add("Vehicle", "Sun", AccelerationSettings::radiation_pressure());
        let pairs: Vec<(&str, &str, usize)> = map
            .iter()
            .map(|(u, e, list)| (u, e, list.len()))
            .collect();
        assert_eq!(
            pairs,
            vec![("Vehicle", "Sun", 2), ("Vehicle", "Earth", 1), ("Moon", "Earth", 1)]
        );
        assert_eq!(map.bodies_undergoing().collect::<Vec<_>>(), vec!["Vehicle", "Moon"]);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn missing_pair_yields_empty_list() {
        let mut map = SelectedAccelerationMap::new();
        map.extend(
            "Vehicle",
            "Earth",
            [
                AccelerationSettings::point_mass_gravity(),
                AccelerationSettings::aerodynamic(),
            ],
        );
        assert!(map.get("Earth", "Vehicle").is_empty());
        assert_eq!(map.get("Vehicle", "Earth").len(), 2);
    }
}
