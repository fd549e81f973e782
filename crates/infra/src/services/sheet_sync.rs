use crate::services::spreadsheet::ISpreadsheetService;
use chrono::{TimeZone, Timelike};
use chrono_tz::America::Bogota;
use nuntius_scheduler_domain::{find_phone_row, format_money, Recipient};
use std::sync::Arc;
use tracing::{error, info, warn};

const SENT: &str = "TRUE";
const UNPAID: &str = "IMPAGA";
const UNKNOWN_NAME: &str = "Sin Nombre";

/// What a synchronization did to the contact sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The contact was found on the given 1-based row
    Updated(usize),
    Appended,
}

/// Marks delivered reminders on the contact sheet.
///
/// Columns: A reason, B sent, C name, D phone, E amount, F date, G payment
/// status, H last reminder.
#[derive(Clone)]
pub struct SheetSynchronizer {
    spreadsheet: Option<Arc<dyn ISpreadsheetService>>,
    sheet_name: String,
}

impl SheetSynchronizer {
    pub fn new(spreadsheet: Arc<dyn ISpreadsheetService>, sheet_name: String) -> Self {
        Self {
            spreadsheet: Some(spreadsheet),
            sheet_name,
        }
    }

    /// Synchronizer that does nothing, used when no spreadsheet is configured
    pub fn disabled() -> Self {
        Self {
            spreadsheet: None,
            sheet_name: String::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.spreadsheet.is_some()
    }

    /// Updates the row of the recipient, found by phone number, or appends a
    /// new one. Errors are logged and never returned.
    pub async fn sync_row(
        &self,
        recipient: &Recipient,
        reason_tag: &str,
        now: i64,
    ) -> Option<SyncOutcome> {
        let spreadsheet = self.spreadsheet.as_ref()?;
        let timestamp = sheet_timestamp(now);

        let phones = match spreadsheet.get_values(&self.range("D:D")).await {
            Ok(rows) => rows,
            Err(e) => {
                error!("Unable to read the phone column of the contact sheet. Error message: {:?}", e);
                return None;
            }
        };
        let column: Vec<&str> = phones
            .iter()
            .map(|row| row.first().map(String::as_str).unwrap_or_default())
            .collect();
        let phone = recipient.phone().unwrap_or_default();

        match find_phone_row(&column, phone) {
            Some(row) => {
                let flagged = spreadsheet
                    .update_values(
                        &self.range(&format!("A{}:B{}", row, row)),
                        vec![vec![reason_tag.to_string(), SENT.to_string()]],
                    )
                    .await;
                if let Err(e) = &flagged {
                    error!("Unable to flag row {} of the contact sheet. Error message: {:?}", row, e);
                }
                let stamped = spreadsheet
                    .update_values(&self.range(&format!("H{}", row)), vec![vec![timestamp]])
                    .await;
                if let Err(e) = &stamped {
                    error!("Unable to stamp row {} of the contact sheet. Error message: {:?}", row, e);
                }
                if flagged.is_err() || stamped.is_err() {
                    return None;
                }
                info!("Contact sheet row {} updated for: {}", row, phone);
                Some(SyncOutcome::Updated(row))
            }
            None => {
                warn!(
                    "Contact: {} not found in the contact sheet, appending a new row",
                    phone
                );
                let row = vec![
                    reason_tag.to_string(),
                    SENT.to_string(),
                    recipient.name().unwrap_or(UNKNOWN_NAME).to_string(),
                    phone.to_string(),
                    format_money(recipient.amount()),
                    recipient.date().unwrap_or_default().to_string(),
                    UNPAID.to_string(),
                    timestamp,
                ];
                match spreadsheet.append_values(&self.range("A:H"), vec![row]).await {
                    Ok(_) => Some(SyncOutcome::Appended),
                    Err(e) => {
                        error!("Unable to append to the contact sheet. Error message: {:?}", e);
                        None
                    }
                }
            }
        }
    }

    fn range(&self, cells: &str) -> String {
        format!("{}!{}", self.sheet_name, cells)
    }
}

/// Renders a timestamp the way the contact sheet has always shown them,
/// `es-CO` in Bogota time: `19/10/2026, 3:04:05 p. m.`
pub fn sheet_timestamp(millis: i64) -> String {
    let dt = match Bogota.timestamp_millis_opt(millis).single() {
        Some(dt) => dt,
        None => return String::new(),
    };
    let (pm, hour) = dt.hour12();
    format!(
        "{}, {}:{:02}:{:02} {}",
        dt.format("%-d/%-m/%Y"),
        hour,
        dt.minute(),
        dt.second(),
        if pm { "p. m." } else { "a. m." }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::spreadsheet::{InMemorySpreadsheet, SheetCall};

    // 2026-10-19T15:04:05-05:00
    const NOW: i64 = 1_792_440_245_000;

    fn contacts() -> Arc<InMemorySpreadsheet> {
        Arc::new(InMemorySpreadsheet::new(vec![
            vec!["Motivo", "Enviado", "Nombre", "Telefono", "Monto", "Fecha", "Estado", "Ultimo"]
                .into_iter()
                .map(String::from)
                .collect(),
            vec!["", "", "Luis", "3109998877"]
                .into_iter()
                .map(String::from)
                .collect(),
            vec!["", "", "Ana", "3001234567"]
                .into_iter()
                .map(String::from)
                .collect(),
        ]))
    }

    #[test]
    fn renders_colombian_timestamps() {
        assert_eq!(sheet_timestamp(NOW), "19/10/2026, 3:04:05 p. m.");
        // 2026-01-05T00:30:00-05:00
        assert_eq!(sheet_timestamp(1_767_591_000_000), "5/1/2026, 12:30:00 a. m.");
    }

    #[tokio::test]
    async fn updates_the_matching_row() {
        let sheet = contacts();
        let sync = SheetSynchronizer::new(sheet.clone(), "Clientes".into());
        let recipient = Recipient::new("Ana", "573001234567");

        let outcome = sync.sync_row(&recipient, "SEMANAL", NOW).await;
        assert_eq!(outcome, Some(SyncOutcome::Updated(3)));
        assert_eq!(
            sheet.calls(),
            vec![
                SheetCall::Get("Clientes!D:D".into()),
                SheetCall::Update(
                    "Clientes!A3:B3".into(),
                    vec![vec!["SEMANAL".into(), "TRUE".into()]]
                ),
                SheetCall::Update(
                    "Clientes!H3".into(),
                    vec![vec!["19/10/2026, 3:04:05 p. m.".into()]]
                ),
            ]
        );
        assert_eq!(sheet.rows()[2][0], "SEMANAL");
        assert_eq!(sheet.rows()[2][7], "19/10/2026, 3:04:05 p. m.");
    }

    #[tokio::test]
    async fn appends_unknown_contacts() {
        let sheet = contacts();
        let sync = SheetSynchronizer::new(sheet.clone(), "Clientes".into());
        let mut recipient = Recipient::new("", "3205556677");
        recipient.monto = Some("1500".into());
        recipient.fecha_nacimiento = Some("1990-05-01".into());

        let outcome = sync.sync_row(&recipient, "CUMPLEANOS", NOW).await;
        assert_eq!(outcome, Some(SyncOutcome::Appended));
        assert_eq!(
            sheet.calls()[1],
            SheetCall::Append(
                "Clientes!A:H".into(),
                vec![vec![
                    "CUMPLEANOS".into(),
                    "TRUE".into(),
                    "Sin Nombre".into(),
                    "3205556677".into(),
                    "$\u{a0}1.500".into(),
                    "1990-05-01".into(),
                    "IMPAGA".into(),
                    "19/10/2026, 3:04:05 p. m.".into(),
                ]]
            )
        );
        assert_eq!(sheet.rows().len(), 4);
    }

    #[tokio::test]
    async fn empty_phone_never_matches() {
        let sheet = contacts();
        let sync = SheetSynchronizer::new(sheet.clone(), "Clientes".into());
        let recipient = Recipient::new("Sin telefono", "");

        let outcome = sync.sync_row(&recipient, "PRUEBA", NOW).await;
        assert_eq!(outcome, Some(SyncOutcome::Appended));
    }

    #[tokio::test]
    async fn errors_are_swallowed() {
        let sheet = contacts();
        sheet.set_unavailable(true);
        let sync = SheetSynchronizer::new(sheet.clone(), "Clientes".into());

        let outcome = sync
            .sync_row(&Recipient::new("Ana", "3001234567"), "PRUEBA", NOW)
            .await;
        assert_eq!(outcome, None);
        assert_eq!(sheet.calls().len(), 1);
    }

    #[tokio::test]
    async fn disabled_does_nothing() {
        let sync = SheetSynchronizer::disabled();
        assert!(!sync.is_enabled());
        assert_eq!(
            sync.sync_row(&Recipient::new("Ana", "3001234567"), "PRUEBA", NOW)
                .await,
            None
        );
    }
}
