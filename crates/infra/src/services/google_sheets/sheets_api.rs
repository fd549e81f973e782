use crate::services::spreadsheet::SheetValues;
use anyhow::anyhow;
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

// https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values

const GOOGLE_API_BASE_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const USER_ENTERED: (&str, &str) = ("valueInputOption", "USER_ENTERED");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeResponse {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ValueRangeRequest {
    values: SheetValues,
}

pub struct GoogleSheetsRestApi {
    client: Client,
    spreadsheet_id: String,
}

impl GoogleSheetsRestApi {
    pub fn new(client: Client, spreadsheet_id: String) -> Self {
        Self {
            client,
            spreadsheet_id,
        }
    }

    /// `{base}/{spreadsheet_id}/values/{range}{suffix}` with every segment
    /// percent encoded, sheet names may contain spaces
    fn values_url(&self, range: &str, suffix: &str) -> anyhow::Result<Url> {
        let mut url = Url::parse(GOOGLE_API_BASE_URL)?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Invalid Google API base url"))?
            .push(&self.spreadsheet_id)
            .push("values")
            .push(&format!("{}{}", range, suffix));
        Ok(url)
    }

    pub async fn get_values(&self, access_token: &str, range: &str) -> anyhow::Result<SheetValues> {
        let req = self.client.get(self.values_url(range, "")?);
        let res: ValueRangeResponse = self.send(req, access_token, "GET", range).await?;
        Ok(res
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    pub async fn update_values(
        &self,
        access_token: &str,
        range: &str,
        values: SheetValues,
    ) -> anyhow::Result<()> {
        let req = self
            .client
            .put(self.values_url(range, "")?)
            .query(&[USER_ENTERED])
            .json(&ValueRangeRequest { values });
        self.send::<Value>(req, access_token, "PUT", range).await?;
        Ok(())
    }

    pub async fn append_values(
        &self,
        access_token: &str,
        range: &str,
        values: SheetValues,
    ) -> anyhow::Result<()> {
        let req = self
            .client
            .post(self.values_url(range, ":append")?)
            .query(&[USER_ENTERED])
            .json(&ValueRangeRequest { values });
        self.send::<Value>(req, access_token, "POST", range).await?;
        Ok(())
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        req: RequestBuilder,
        access_token: &str,
        method: &str,
        range: &str,
    ) -> anyhow::Result<T> {
        match req.bearer_auth(access_token).send().await {
            Ok(res) if res.status().is_success() => res.json::<T>().await.map_err(|e| {
                error!(
                    "[Unexpected Response] Google Sheets API {} {} error. Error message: {:?}",
                    method, range, e
                );
                anyhow::Error::new(e)
            }),
            Ok(res) => {
                let status = res.status();
                let body = res.text().await.unwrap_or_default();
                error!(
                    "[Unexpected Response] Google Sheets API {} {} failed with status: {}. Response body: {}",
                    method, range, status, body
                );
                Err(anyhow!("Google Sheets API responded with status: {}", status))
            }
            Err(e) => {
                error!(
                    "[Network Error] Google Sheets API {} {} error. Error message: {:?}",
                    method, range, e
                );
                Err(anyhow::Error::new(e))
            }
        }
    }
}

fn cell_to_string(cell: Value) -> String {
    match cell {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
