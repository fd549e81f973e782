use super::{ISpreadsheetService, SheetValues};
use anyhow::anyhow;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex, MutexGuard, PoisonError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetCall {
    Get(String),
    Update(String, SheetValues),
    Append(String, SheetValues),
}

/// Spreadsheet kept in memory, recording every call made to it.
///
/// Only understands the ranges the synchronizer uses: reads of a single
/// column and writes starting at a given cell.
#[derive(Default)]
pub struct InMemorySpreadsheet {
    rows: Mutex<SheetValues>,
    calls: Mutex<Vec<SheetCall>>,
    unavailable: AtomicBool,
}

impl InMemorySpreadsheet {
    pub fn new(rows: SheetValues) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Default::default()
        }
    }

    /// Makes every following call fail
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn rows(&self) -> SheetValues {
        lock(&self.rows).clone()
    }

    pub fn calls(&self) -> Vec<SheetCall> {
        lock(&self.calls).clone()
    }

    fn record(&self, call: SheetCall) -> anyhow::Result<()> {
        lock(&self.calls).push(call);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(anyhow!("Spreadsheet is unavailable"));
        }
        Ok(())
    }
}

fn lock<T>(value: &Mutex<T>) -> MutexGuard<'_, T> {
    value.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Zero based column and one based row of the first cell of an A1 range
fn range_start(range: &str) -> anyhow::Result<(usize, Option<usize>)> {
    let cells = range.rsplit('!').next().unwrap_or(range);
    let first = cells.split(':').next().unwrap_or(cells);
    let letters: String = first.chars().take_while(|c| c.is_ascii_alphabetic()).collect();
    if letters.is_empty() {
        return Err(anyhow!("Invalid range: {}", range));
    }
    let column = letters
        .to_ascii_uppercase()
        .bytes()
        .fold(0, |acc, b| acc * 26 + (b - b'A' + 1) as usize)
        - 1;
    let row = first[letters.len()..].parse::<usize>().ok();
    Ok((column, row))
}

#[async_trait::async_trait]
impl ISpreadsheetService for InMemorySpreadsheet {
    async fn get_values(&self, range: &str) -> anyhow::Result<SheetValues> {
        self.record(SheetCall::Get(range.to_string()))?;
        let (column, _) = range_start(range)?;
        Ok(lock(&self.rows)
            .iter()
            .map(|row| vec![row.get(column).cloned().unwrap_or_default()])
            .collect())
    }

    async fn update_values(&self, range: &str, values: SheetValues) -> anyhow::Result<()> {
        self.record(SheetCall::Update(range.to_string(), values.clone()))?;
        let (column, row) = range_start(range)?;
        let row = row.ok_or_else(|| anyhow!("Update range without a row: {}", range))?;

        let mut rows = lock(&self.rows);
        for (i, values) in values.into_iter().enumerate() {
            let index = row - 1 + i;
            if rows.len() <= index {
                rows.resize(index + 1, Vec::new());
            }
            let cells = &mut rows[index];
            for (j, value) in values.into_iter().enumerate() {
                if cells.len() <= column + j {
                    cells.resize(column + j + 1, String::new());
                }
                cells[column + j] = value;
            }
        }
        Ok(())
    }

    async fn append_values(&self, range: &str, values: SheetValues) -> anyhow::Result<()> {
        self.record(SheetCall::Append(range.to_string(), values.clone()))?;
        lock(&self.rows).extend(values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_range_start() {
        assert_eq!(range_start("Clientes!D:D").unwrap(), (3, None));
        assert_eq!(range_start("Clientes!A12:B12").unwrap(), (0, Some(12)));
        assert_eq!(range_start("H3").unwrap(), (7, Some(3)));
        assert_eq!(range_start("Hoja 1!AA1").unwrap(), (26, Some(1)));
        assert!(range_start("Clientes!12").is_err());
    }

    #[tokio::test]
    async fn reads_and_writes_cells() {
        let sheet = InMemorySpreadsheet::new(vec![vec![
            "Motivo".into(),
            "Enviado".into(),
            "Nombre".into(),
            "Telefono".into(),
        ]]);
        sheet
            .update_values("Clientes!B2:C2", vec![vec!["TRUE".into(), "Ana".into()]])
            .await
            .unwrap();
        assert_eq!(sheet.rows()[1], vec!["", "TRUE", "Ana"]);

        let column = sheet.get_values("Clientes!D:D").await.unwrap();
        assert_eq!(column, vec![vec!["Telefono".to_string()], vec![String::new()]]);

        sheet.set_unavailable(true);
        assert!(sheet.get_values("Clientes!D:D").await.is_err());
        assert_eq!(sheet.calls().len(), 3);
    }
}
