use super::IReminderRepo;
use crate::repos::shared::file_repo::{
    self, parse_timestamp, read_timestamp, to_rfc3339, CollectionFile, FileDocument, JsonFile,
};
use chrono_tz::Tz;
use nuntius_scheduler_domain::{ExecutionRecord, Recipient, Reminder, ReminderKind, ID};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use tracing::warn;

/// Reminders stored in `recordatorios.json`. Stored dates without an offset
/// are read in `timezone`.
pub struct FileReminderRepo {
    file: JsonFile<RemindersFile>,
    timezone: Tz,
}

impl FileReminderRepo {
    pub fn new(path: impl Into<PathBuf>, timezone: Tz) -> Self {
        Self {
            file: JsonFile::new(path),
            timezone,
        }
    }

    pub async fn init(&self) -> anyhow::Result<()> {
        self.file.init().await
    }
}

#[async_trait::async_trait]
impl IReminderRepo for FileReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        file_repo::insert::<_, ReminderDocument, _>(&self.file, reminder).await
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        file_repo::save::<_, ReminderDocument, _>(&self.file, reminder).await
    }

    async fn save_many(&self, reminders: &[Reminder]) -> anyhow::Result<()> {
        file_repo::save_many::<_, ReminderDocument, _>(&self.file, reminders).await
    }

    async fn find(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        file_repo::find::<_, ReminderDocument, _>(&self.file, reminder_id.as_str(), &self.timezone)
            .await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<Reminder>> {
        file_repo::find_by::<_, ReminderDocument, _, _>(&self.file, &self.timezone, |_| true).await
    }

    async fn find_by_owner(&self, owner_id: &str) -> anyhow::Result<Vec<Reminder>> {
        file_repo::find_by::<_, ReminderDocument, _, _>(
            &self.file,
            &self.timezone,
            |r: &Reminder| r.owner_id == owner_id,
        )
        .await
    }

    async fn delete(&self, reminder_id: &ID) -> anyhow::Result<Option<Reminder>> {
        file_repo::delete::<_, ReminderDocument, _>(
            &self.file,
            reminder_id.as_str(),
            &self.timezone,
        )
        .await
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RemindersFile {
    #[serde(default)]
    recordatorios: Vec<Value>,
}

impl CollectionFile for RemindersFile {
    fn documents(&self) -> &Vec<Value> {
        &self.recordatorios
    }

    fn documents_mut(&mut self) -> &mut Vec<Value> {
        &mut self.recordatorios
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReminderDocument {
    id: String,
    #[serde(default)]
    owner_id: String,
    tipo: ReminderKind,
    #[serde(default)]
    instance_name: String,
    #[serde(default)]
    mensaje: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    modo_destinatarios: Option<Value>,
    #[serde(default)]
    destinatarios: Vec<Recipient>,
    #[serde(default, deserialize_with = "lenient_i64")]
    dias_anticipacion: i64,
    #[serde(default)]
    dia_envio: Option<String>,
    #[serde(default)]
    hora_envio: Option<String>,
    #[serde(default)]
    activo: bool,
    #[serde(default)]
    fecha_creacion: Option<String>,
    #[serde(default)]
    proximo_envio: Option<String>,
    #[serde(default)]
    ultimo_envio: Option<String>,
    #[serde(default)]
    total_destinatarios: usize,
    #[serde(default)]
    historial: Vec<HistoryDocument>,
}

#[derive(Debug, Serialize, Deserialize)]
struct HistoryDocument {
    fecha: String,
    #[serde(default)]
    enviados: usize,
    #[serde(default)]
    fallidos: usize,
    #[serde(default)]
    destinatarios: usize,
}

impl HistoryDocument {
    fn to_domain(self, tz: &Tz, id: &str) -> ExecutionRecord {
        let at = read_timestamp(&self.fecha, tz);
        if at.is_none() {
            warn!(
                "Keeping unparseable historial.fecha: {} of stored document: {} as it is",
                self.fecha, id
            );
        }
        // Dates in any other shape than ours are written back untouched
        let recorded_as = if at.and_then(to_rfc3339).as_deref() == Some(self.fecha.as_str()) {
            None
        } else {
            Some(self.fecha)
        };
        ExecutionRecord {
            at: at.unwrap_or_default(),
            recorded_as,
            sent_count: self.enviados,
            failed_count: self.fallidos,
            total_recipients: self.destinatarios,
        }
    }

    fn from_domain(record: &ExecutionRecord) -> Self {
        Self {
            fecha: record
                .recorded_as
                .clone()
                .or_else(|| to_rfc3339(record.at))
                .unwrap_or_default(),
            enviados: record.sent_count,
            fallidos: record.failed_count,
            destinatarios: record.total_recipients,
        }
    }
}

impl FileDocument<Reminder> for ReminderDocument {
    fn to_domain(self, tz: &Tz) -> Reminder {
        let id = self.id;
        let history = self
            .historial
            .into_iter()
            .map(|h| h.to_domain(tz, &id))
            .collect();

        Reminder {
            owner_id: self.owner_id,
            kind: self.tipo,
            instance_name: self.instance_name,
            message: self.mensaje,
            recipient_selection_mode: self.modo_destinatarios,
            recipients: self.destinatarios,
            lead_days: self.dias_anticipacion,
            send_weekday: self.dia_envio,
            send_time: self.hora_envio,
            active: self.activo,
            created_at: parse_timestamp(self.fecha_creacion.as_deref(), tz, "fechaCreacion", &id)
                .unwrap_or_default(),
            next_send_at: parse_timestamp(self.proximo_envio.as_deref(), tz, "proximoEnvio", &id),
            last_send_at: parse_timestamp(self.ultimo_envio.as_deref(), tz, "ultimoEnvio", &id),
            total_recipients: self.total_destinatarios,
            history,
            id: ID::from(id),
        }
    }

    fn from_domain(reminder: &Reminder) -> Self {
        Self {
            id: reminder.id.to_string(),
            owner_id: reminder.owner_id.clone(),
            tipo: reminder.kind,
            instance_name: reminder.instance_name.clone(),
            mensaje: reminder.message.clone(),
            modo_destinatarios: reminder.recipient_selection_mode.clone(),
            destinatarios: reminder.recipients.clone(),
            dias_anticipacion: reminder.lead_days,
            dia_envio: reminder.send_weekday.clone(),
            hora_envio: reminder.send_time.clone(),
            activo: reminder.active,
            fecha_creacion: to_rfc3339(reminder.created_at),
            proximo_envio: reminder.next_send_at.and_then(to_rfc3339),
            ultimo_envio: reminder.last_send_at.and_then(to_rfc3339),
            total_destinatarios: reminder.total_recipients,
            historial: reminder
                .history
                .iter()
                .map(HistoryDocument::from_domain)
                .collect(),
        }
    }
}

// Lead days have been stored both as numbers and as the raw form input
fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0,
    })
}
