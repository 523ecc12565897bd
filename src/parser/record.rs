/// Column headers used when listing records are written to CSV.
pub const LISTING_HEADERS: [&str; 3] = ["会社名", "住所", "電話番号"];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingRecord {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl ListingRecord {
    pub fn new(name: &str, address: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            phone: phone.to_string(),
        }
    }

    pub fn to_row(&self) -> Vec<String> {
        vec![self.name.clone(), self.address.clone(), self.phone.clone()]
    }
}
