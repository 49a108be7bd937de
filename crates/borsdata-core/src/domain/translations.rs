use serde::{Deserialize, Serialize};

/// Raw entry of the translation metadata list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    #[serde(
        rename(deserialize = "translationKey"),
        alias = "translation_key",
        default
    )]
    pub translation_key: Option<String>,
    #[serde(rename(deserialize = "nameSv"), alias = "name_sv", default)]
    pub name_sv: Option<String>,
    #[serde(rename(deserialize = "nameEn"), alias = "name_en", default)]
    pub name_en: Option<String>,
}

/// Localized name of a branch, sector or country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationItem {
    pub id: i64,
    #[serde(rename(deserialize = "nameSv"), alias = "name_sv", default)]
    pub name_sv: Option<String>,
    #[serde(rename(deserialize = "nameEn"), alias = "name_en", default)]
    pub name_en: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TranslationCategory {
    Branch,
    Sector,
    Country,
}

impl TranslationCategory {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Branch => "BRANCH",
            Self::Sector => "SECTOR",
            Self::Country => "COUNTRY",
        }
    }
}

/// Extract the items of `category` from keys shaped `L_<CATEGORY>_<digits>`.
///
/// Records whose key is missing, names another category or carries a
/// non-numeric id are skipped.
pub fn derive_translations(
    records: &[TranslationRecord],
    category: TranslationCategory,
) -> Vec<TranslationItem> {
    records
        .iter()
        .filter_map(|record| {
            let id = parse_key(record.translation_key.as_deref()?, category)?;
            Some(TranslationItem {
                id,
                name_sv: record.name_sv.clone(),
                name_en: record.name_en.clone(),
            })
        })
        .collect()
}

fn parse_key(key: &str, category: TranslationCategory) -> Option<i64> {
    let (prefix, digits) = key.strip_prefix("L_")?.rsplit_once('_')?;
    if prefix != category.as_str() {
        return None;
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Translation metadata with the derived per-category views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationMetadata {
    pub records: Vec<TranslationRecord>,
    pub branches: Vec<TranslationItem>,
    pub sectors: Vec<TranslationItem>,
    pub countries: Vec<TranslationItem>,
}

impl TranslationMetadata {
    pub fn from_records(records: Vec<TranslationRecord>) -> Self {
        Self {
            branches: derive_translations(&records, TranslationCategory::Branch),
            sectors: derive_translations(&records, TranslationCategory::Sector),
            countries: derive_translations(&records, TranslationCategory::Country),
            records,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, name: &str) -> TranslationRecord {
        TranslationRecord {
            translation_key: Some(key.to_owned()),
            name_sv: Some(format!("{name} (sv)")),
            name_en: Some(name.to_owned()),
        }
    }

    #[test]
    fn derives_each_category_and_skips_malformed_keys() {
        let metadata = TranslationMetadata::from_records(vec![
            record("L_BRANCH_1", "Banks"),
            record("L_SECTOR_10", "Finance"),
            record("L_COUNTRY_2", "Norway"),
            record("L_BOGUS", "Nothing"),
        ]);

        assert_eq!(metadata.records.len(), 4);
        assert_eq!(metadata.branches.len(), 1);
        assert_eq!(metadata.branches[0].id, 1);
        assert_eq!(metadata.sectors[0].id, 10);
        assert_eq!(metadata.countries[0].id, 2);
        assert_eq!(metadata.countries[0].name_en.as_deref(), Some("Norway"));
    }

    #[test]
    fn rejects_non_numeric_and_foreign_keys() {
        let records = vec![
            record("L_BRANCH_x1", "a"),
            record("L_BRANCH_", "b"),
            record("BRANCH_3", "c"),
            record("L_BRANCHES_4", "d"),
            record("L_BRANCH_-5", "e"),
            TranslationRecord {
                translation_key: None,
                name_sv: None,
                name_en: None,
            },
        ];
        assert!(derive_translations(&records, TranslationCategory::Branch).is_empty());
    }
}
