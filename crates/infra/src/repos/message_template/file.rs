use super::IMessageTemplateRepo;
use crate::repos::shared::file_repo::{
    self, parse_timestamp, to_rfc3339, CollectionFile, FileDocument, JsonFile,
};
use chrono_tz::Tz;
use nuntius_scheduler_domain::{MessageTemplate, ID};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Message templates stored in `plantillas.json`
pub struct FileMessageTemplateRepo {
    file: JsonFile<TemplatesFile>,
    timezone: Tz,
}

impl FileMessageTemplateRepo {
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
impl IMessageTemplateRepo for FileMessageTemplateRepo {
    async fn insert(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        file_repo::insert::<_, TemplateDocument, _>(&self.file, template).await
    }

    async fn save(&self, template: &MessageTemplate) -> anyhow::Result<()> {
        file_repo::save::<_, TemplateDocument, _>(&self.file, template).await
    }

    async fn find(&self, template_id: &ID) -> anyhow::Result<Option<MessageTemplate>> {
        file_repo::find::<_, TemplateDocument, _>(&self.file, template_id.as_str(), &self.timezone)
            .await
    }

    async fn find_all(&self) -> anyhow::Result<Vec<MessageTemplate>> {
        file_repo::find_by::<_, TemplateDocument, _, _>(&self.file, &self.timezone, |_| true).await
    }

    async fn find_by_owner(&self, owner_id: &str) -> anyhow::Result<Vec<MessageTemplate>> {
        file_repo::find_by::<_, TemplateDocument, _, _>(
            &self.file,
            &self.timezone,
            |t: &MessageTemplate| t.owner_id == owner_id,
        )
        .await
    }

    async fn delete(&self, template_id: &ID) -> anyhow::Result<Option<MessageTemplate>> {
        file_repo::delete::<_, TemplateDocument, _>(
            &self.file,
            template_id.as_str(),
            &self.timezone,
        )
        .await
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct TemplatesFile {
    #[serde(default)]
    plantillas: Vec<Value>,
}

impl CollectionFile for TemplatesFile {
    fn documents(&self) -> &Vec<Value> {
        &self.plantillas
    }

    fn documents_mut(&mut self) -> &mut Vec<Value> {
        &mut self.plantillas
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateDocument {
    id: String,
    #[serde(default)]
    owner_id: String,
    #[serde(default)]
    nombre: String,
    #[serde(default)]
    mensaje: String,
    #[serde(default)]
    fecha_creacion: Option<String>,
}

impl FileDocument<MessageTemplate> for TemplateDocument {
    fn to_domain(self, tz: &Tz) -> MessageTemplate {
        MessageTemplate {
            created_at: parse_timestamp(self.fecha_creacion.as_deref(), tz, "fechaCreacion", &self.id)
                .unwrap_or_default(),
            id: ID::from(self.id),
            owner_id: self.owner_id,
            name: self.nombre,
            message: self.mensaje,
        }
    }

    fn from_domain(template: &MessageTemplate) -> Self {
        Self {
            id: template.id.to_string(),
            owner_id: template.owner_id.clone(),
            nombre: template.name.clone(),
            mensaje: template.message.clone(),
            fecha_creacion: to_rfc3339(template.created_at),
        }
    }
}
