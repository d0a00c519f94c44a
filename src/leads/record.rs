use std::collections::BTreeSet;

/// Number of cells in every row written to the sheet. The configured
/// header list must have exactly this many entries.
pub const COLUMN_COUNT: usize = 6;

/// One row of cells, ordered to match the configured headers.
pub type SheetRow = Vec<String>;

/// A business listing, normalized out of whatever shape the data source
/// produced it in.
///
/// `name` and `address` are always present; a listing without them is
/// dropped at the extraction boundary instead of ever constructing one
/// of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessRecord {
    pub name: String,
    pub address: String,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub social_links: BTreeSet<String>,
    pub review_summary: Option<String>,
}

impl BusinessRecord {
    /// Flattens the record into the fixed column layout: name, address,
    /// phone, website, social links, review summary.
    ///
    /// Absent optional fields become empty cells and social links are
    /// joined in sorted order, so the same record always produces the
    /// same row.
    pub fn to_sheet_row(&self) -> SheetRow {
        vec![
            self.name.clone(),
            self.address.clone(),
            self.phone.clone().unwrap_or_default(),
            self.website.clone().unwrap_or_default(),
            self.social_links
                .iter()
                .cloned()
                .collect::<Vec<_>>()
                .join(", "),
            self.review_summary.clone().unwrap_or_default(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_record() -> BusinessRecord {
        BusinessRecord {
            name: "Café Central".to_string(),
            address: "Praça do Comércio 1, Lisbon".to_string(),
            phone: None,
            website: None,
            social_links: BTreeSet::new(),
            review_summary: None,
        }
    }

    #[test]
    fn test_row_always_has_the_fixed_column_count() {
        assert_eq!(minimal_record().to_sheet_row().len(), COLUMN_COUNT);
    }

    #[test]
    fn test_absent_fields_become_empty_cells() {
        let row = minimal_record().to_sheet_row();

        assert_eq!(
            row,
            vec![
                "Café Central".to_string(),
                "Praça do Comércio 1, Lisbon".to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
            ]
        );
    }

    #[test]
    fn test_social_links_join_in_sorted_order() {
        let mut record = minimal_record();
        record
            .social_links
            .insert("https://instagram.com/cafecentral".to_string());
        record
            .social_links
            .insert("https://facebook.com/cafecentral".to_string());

        let row = record.to_sheet_row();

        assert_eq!(
            row[4],
            "https://facebook.com/cafecentral, https://instagram.com/cafecentral"
        );
    }

    #[test]
    fn test_mapping_is_deterministic() {
        let mut record = minimal_record();
        record.phone = Some("+351 21 000 0000".to_string());
        record.review_summary = Some("4.6 stars (1,234 reviews)".to_string());

        assert_eq!(record.to_sheet_row(), record.to_sheet_row());
    }
}
