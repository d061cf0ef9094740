use sm_core::model::{MappingKind, SourceItem};

const SPECIALTIES: [&str; 12] = [
    "Cardiology",
    "Cardiology - Invasive",
    "Dermatology",
    "Emergency Medicine",
    "Family Medicine",
    "Gastroenterology",
    "Internal Medicine",
    "Neurology",
    "OB/GYN",
    "Oncology",
    "Pediatrics",
    "Radiology",
];
const REGIONS: [&str; 5] = ["Northeast", "North East", "Midwest", "South", "West"];
const VARIABLES: [&str; 4] = ["Base Pay", "TCC", "wRVUs", "Work RVUs"];
const PROVIDER_TYPES: [&str; 3] = ["Physician", "APP", "Nurse Practitioner"];
const SURVEYS: [&str; 4] = ["MGMA", "SullivanCotter", "AMGA", "Gallagher"];

/// Deterministic demo data for running the app without a document.
pub fn demo_items(count: usize) -> Vec<SourceItem> {
    (0..count)
        .map(|n| {
            let kind = match n % 10 {
                0..=5 => MappingKind::Specialty,
                6 | 7 => MappingKind::Region,
                8 => MappingKind::Variable,
                _ => MappingKind::ProviderType,
            };
            let base = match kind {
                MappingKind::Specialty => SPECIALTIES[n % SPECIALTIES.len()],
                MappingKind::Region => REGIONS[n % REGIONS.len()],
                MappingKind::Variable => VARIABLES[n % VARIABLES.len()],
                MappingKind::ProviderType => PROVIDER_TYPES[n % PROVIDER_TYPES.len()],
            };
            let survey = SURVEYS[(n / 10) % SURVEYS.len()];
            SourceItem {
                id: format!("item-{n}"),
                name: format!("{base} #{}", n / 40),
                kind,
                survey: survey.to_string(),
                occurrences: (n % 17) as u32 + 1,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_sample_001_ids_are_unique_and_stable() {
        let a = demo_items(200);
        let b = demo_items(200);
        assert_eq!(a, b);
        let mut ids: Vec<&str> = a.iter().map(|item| item.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
        assert!(a.iter().any(|item| item.kind == MappingKind::ProviderType));
    }
}
