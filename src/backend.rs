//! Client for the habit-tracker REST backend.
//!
//! The backend owns persistence, streaks and EMA computation; this side only
//! needs success/failure and the JSON shapes it hands back.

use crate::models::{HabitId, HistoryRow, KpiDataPoint, Period, StreakEntry};
use crate::rules::RuleRequest;
use chrono::NaiveDate;
use reqwest::{Client, Response, StatusCode, Url};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend unreachable: {0}")]
    Network(String),
    #[error("backend answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("unexpected backend payload: {0}")]
    Parse(String),
    #[error("invalid backend url: {0}")]
    Url(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    client: Client,
}

impl BackendClient {
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        let base_url = Url::parse(base_url).map_err(|err| BackendError::Url(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(BackendError::Url(format!("{base_url} cannot be a base")));
        }
        Ok(Self {
            base_url,
            client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn update_habit(
        &self,
        id: HabitId,
        completed: bool,
        date: Option<NaiveDate>,
    ) -> Result<String, BackendError> {
        let mut form = vec![("completed", completed.to_string())];
        if let Some(date) = date {
            form.push(("date", date.to_string()));
        }
        let url = self.endpoint(&["habits", "update", &id.to_string()])?;
        let response = self.client.post(url).form(&form).send().await?;
        read_text(response).await
    }

    pub async fn fetch_streaks(&self, ids: &[HabitId]) -> Result<Vec<StreakEntry>, BackendError> {
        let url = self.endpoint(&["habits", "streaks"])?;
        let response = self.client.post(url).json(ids).send().await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    pub async fn fetch_kpi_data(
        &self,
        name: &str,
        period: Period,
    ) -> Result<Vec<KpiDataPoint>, BackendError> {
        let url = self.endpoint(&["kpis", name, "data"])?;
        let response = self
            .client
            .get(url)
            .query(&[("period", period.as_str())])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    pub async fn add_kpi_data(
        &self,
        name: &str,
        date: NaiveDate,
        value: f64,
    ) -> Result<String, BackendError> {
        let url = self.endpoint(&["kpis", name, "data"])?;
        let form = [("date", date.to_string()), ("value", value.to_string())];
        let response = self.client.post(url).form(&form).send().await?;
        read_text(response).await
    }

    pub async fn delete_kpi(&self, name: &str) -> Result<String, BackendError> {
        let url = self.endpoint(&["kpis", name])?;
        let response = self.client.delete(url).send().await?;
        read_text(response).await
    }

    pub async fn delete_habit(&self, id: HabitId) -> Result<String, BackendError> {
        let url = self.endpoint(&["habits", "delete", &id.to_string()])?;
        let response = self.client.delete(url).send().await?;
        read_text(response).await
    }

    pub async fn fetch_history(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HistoryRow>, BackendError> {
        let url = self.endpoint(&["habits", "tableAsync"])?;
        let response = self
            .client
            .get(url)
            .query(&[("startDate", start.to_string()), ("endDate", end.to_string())])
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json().await?)
    }

    pub async fn add_rule(&self, rule: &RuleRequest) -> Result<String, BackendError> {
        let url = self.endpoint(&["habits", "addRule"])?;
        let response = self.client.post(url).json(rule).send().await?;
        read_text(response).await
    }

    /// Each segment is percent-encoded on its own, so KPI names may contain `/` or spaces.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, BackendError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| BackendError::Url(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status { status, body })
}

async fn read_text(response: Response) -> Result<String, BackendError> {
    let response = ensure_success(response).await?;
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_kpi_names_as_one_segment() {
        let client = BackendClient::new("http://localhost:8081/").unwrap();
        let url = client.endpoint(&["kpis", "sleep hours/night", "data"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8081/kpis/sleep%20hours%2Fnight/data"
        );
    }

    #[test]
    fn endpoint_respects_base_path() {
        let client = BackendClient::new("http://localhost:8081/tracker").unwrap();
        let url = client.endpoint(&["habits", "update", "12"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8081/tracker/habits/update/12");
    }

    #[test]
    fn rejects_non_base_urls() {
        assert!(matches!(
            BackendClient::new("mailto:someone@example.com"),
            Err(BackendError::Url(_))
        ));
        assert!(matches!(BackendClient::new("not a url"), Err(BackendError::Url(_))));
    }
}
