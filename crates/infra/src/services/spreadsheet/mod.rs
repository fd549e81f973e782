mod inmemory;

pub use inmemory::{InMemorySpreadsheet, SheetCall};

/// Values of a spreadsheet range, row by row
pub type SheetValues = Vec<Vec<String>>;

/// Cell level access to one spreadsheet. Ranges use A1 notation including
/// the sheet name, e.g. `Clientes!D:D`.
#[async_trait::async_trait]
pub trait ISpreadsheetService: Send + Sync {
    async fn get_values(&self, range: &str) -> anyhow::Result<SheetValues>;
    /// Overwrites the cells of `range`, values are interpreted as if typed
    /// in by a user
    async fn update_values(&self, range: &str, values: SheetValues) -> anyhow::Result<()>;
    /// Appends rows after the last row of the table found in `range`
    async fn append_values(&self, range: &str, values: SheetValues) -> anyhow::Result<()>;
}
