use std::io::Read;

/// Uploaded table as read from disk or a request body, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Read a CSV document with a header row. Rows may be shorter or longer
    /// than the header; missing trailing cells read as absent. Headers must
    /// be UTF-8; invalid bytes in data cells are replaced, not rejected.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for result in csv_reader.byte_records() {
            let record = result?;
            rows.push(
                record
                    .iter()
                    .map(|cell| String::from_utf8_lossy(cell).into_owned())
                    .collect(),
            );
        }

        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_ragged_rows() {
        let csv = "Customer Search Term,Spend\nshoes,1.5\nboots\n";
        let table = RawTable::from_csv_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.headers(), ["Customer Search Term", "Spend"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 1), Some("1.5"));
        assert_eq!(table.cell(1, 0), Some("boots"));
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(5, 0), None);
    }

    #[test]
    fn non_utf8_cells_are_read_lossily() {
        let mut bytes = b"Campaign Name,Customer Search Term\nCaf".to_vec();
        bytes.push(0xe9);
        bytes.extend_from_slice(b" Camp,shoes\n");

        let table = RawTable::from_csv_reader(bytes.as_slice()).unwrap();
        assert_eq!(table.cell(0, 0), Some("Caf\u{fffd} Camp"));
        assert_eq!(table.cell(0, 1), Some("shoes"));
    }

    #[test]
    fn header_only_document_is_empty() {
        let table = RawTable::from_csv_reader("targeting\n".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 1);
    }
}
