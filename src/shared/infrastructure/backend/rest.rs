use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error};

use crate::modules::catalog::core::entity::CatalogKind;
use crate::modules::catalog::core::errors::CatalogError;
use crate::modules::catalog::core::schedule_group::{
    ScheduleGroupKey, ScheduleRecord, ScheduleRow,
};
use crate::modules::catalog::use_cases::manage_entities::repository_port::CatalogRepository;
use crate::modules::catalog::use_cases::manage_schedules::repository_port::ScheduleRepository;
use crate::modules::registration::core::offering::{
    CenterRef, DEFAULT_CAPACITY, MaterialRef, Offering, TeacherRef,
};
use crate::modules::registration::core::outcome::RegistrationOutcome;
use crate::modules::registration::use_cases::load_offerings::source_port::OfferingSource;
use crate::modules::registration::use_cases::submit_registration::command::RegisterStudent;
use crate::modules::registration::use_cases::submit_registration::gateway_port::RegistrationGateway;
use crate::modules::students::core::filter::StudentQuery;
use crate::modules::students::core::student::StudentPage;
use crate::modules::students::use_cases::delete_student::remover_port::RegistrationRemover;
use crate::modules::students::use_cases::list_students::queries_port::StudentDirectory;
use crate::shared::core::catalog_entity::CatalogEntity;
use crate::shared::core::grade::Grade;
use crate::shared::infrastructure::backend::{BackendError, UNIQUE_VIOLATION};

const REGISTRATIONS_TABLE: &str = "registrations_2025_2026";
const SCHEDULE_SELECT: &str = "*,teacher:teachers(id,name,is_active),material:materials(id,name),center:centers(id,name)";

#[derive(Deserialize)]
struct GatewayError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct NamedWire {
    id: String,
    name: String,
    #[serde(default = "active")]
    is_active: bool,
}

fn active() -> bool {
    true
}

#[derive(Deserialize)]
struct ScheduleWire {
    id: String,
    grade: Grade,
    #[serde(default)]
    material_id: Option<String>,
    #[serde(default)]
    teacher_id: Option<String>,
    center_id: String,
    group_name: String,
    time_slot: String,
    #[serde(default)]
    capacity: Option<u32>,
    #[serde(default = "active")]
    is_active: bool,
    /// Maintained by the backend as registrations are inserted and removed.
    #[serde(default, rename = "registrations_2025_2026_count")]
    registered: Option<u32>,
    #[serde(default)]
    teacher: Option<NamedWire>,
    #[serde(default)]
    material: Option<NamedWire>,
    #[serde(default)]
    center: Option<NamedWire>,
}

impl ScheduleWire {
    fn record(&self) -> ScheduleRecord {
        ScheduleRecord {
            id: self.id.clone(),
            grade: self.grade,
            material_id: self.material_id.clone(),
            teacher_id: self.teacher_id.clone(),
            center_id: self.center_id.clone(),
            group_name: self.group_name.clone(),
            time_slot: self.time_slot.clone(),
            capacity: self.capacity.unwrap_or(DEFAULT_CAPACITY),
            is_active: self.is_active,
        }
    }

    fn into_offering(self) -> Offering {
        let registered = self.registered.unwrap_or_default();
        let record = self.record();
        Offering {
            id: record.id,
            grade: record.grade,
            material: self.material.map(|m| MaterialRef {
                id: m.id,
                name: m.name,
            }),
            teacher: self.teacher.map(|t| TeacherRef {
                id: t.id,
                name: t.name,
                is_active: t.is_active,
            }),
            center: self.center.map_or_else(
                || CenterRef {
                    id: record.center_id.clone(),
                    name: record.center_id.clone(),
                },
                |c| CenterRef {
                    id: c.id,
                    name: c.name,
                },
            ),
            group_name: record.group_name,
            time_slot: record.time_slot,
            capacity: record.capacity,
            registered,
            is_active: record.is_active,
        }
    }

    fn into_row(self) -> ScheduleRow {
        ScheduleRow {
            registered: self.registered.unwrap_or_default(),
            record: self.record(),
            teacher_name: self.teacher.map(|t| t.name),
            material_name: self.material.map(|m| m.name),
            center_name: self.center.map(|c| c.name),
        }
    }
}

#[derive(Deserialize)]
struct RegisterReply {
    success: bool,
    #[serde(default)]
    error_code: Option<String>,
}

/// Client for the hosted backend's REST gateway (`/rest/v1/<table>`, `/rest/v1/rpc/<fn>`).
#[derive(Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestBackend {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn rpc(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, BackendError> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let decoded: Option<GatewayError> = serde_json::from_str(&body).ok();
        let code = decoded
            .as_ref()
            .and_then(|e| e.code.clone())
            .unwrap_or_else(|| status.as_u16().to_string());
        let message = decoded.and_then(|e| e.message).unwrap_or(body);
        error!(%status, %code, %message, "backend request rejected");
        Err(BackendError::Rejected { code, message })
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, BackendError> {
        self.send(request)
            .await?
            .json::<T>()
            .await
            .map_err(|err| BackendError::Decode(err.to_string()))
    }

    async fn schedules(&self, only_active: bool) -> Result<Vec<ScheduleWire>, BackendError> {
        let mut request = self
            .client
            .get(self.table("schedules"))
            .query(&[("select", SCHEDULE_SELECT), ("order", "group_name,time_slot")]);
        if only_active {
            request = request.query(&[("is_active", "eq.true")]);
        }
        self.fetch(request).await
    }

    async fn entities(&self, kind: CatalogKind, only_active: bool) -> Result<Vec<CatalogEntity>, BackendError> {
        let mut request = self
            .client
            .get(self.table(kind.table()))
            .query(&[("select", "*"), ("order", "name")]);
        if only_active {
            request = request.query(&[("is_active", "eq.true")]);
        }
        let rows: Vec<NamedWire> = self.fetch(request).await?;
        Ok(rows
            .into_iter()
            .map(|row| CatalogEntity {
                id: row.id,
                name: row.name,
                is_active: row.is_active,
            })
            .collect())
    }

    async fn single_entity(&self, request: RequestBuilder) -> Result<CatalogEntity, CatalogError> {
        let rows: Vec<CatalogEntity> = self
            .fetch(request.header("Prefer", "return=representation"))
            .await
            .map_err(catalog_error)?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::Decode("empty representation".into()).into())
    }
}

fn catalog_error(err: BackendError) -> CatalogError {
    match err.code() {
        Some(UNIQUE_VIOLATION) => CatalogError::AlreadyExists,
        _ => CatalogError::Backend(err),
    }
}

#[async_trait]
impl OfferingSource for RestBackend {
    async fn active_offerings(&self) -> anyhow::Result<Vec<Offering>> {
        let schedules = self.schedules(true).await?;
        debug!(count = schedules.len(), "active schedules fetched");
        Ok(schedules.into_iter().map(ScheduleWire::into_offering).collect())
    }

    async fn teachers(&self) -> anyhow::Result<Vec<CatalogEntity>> {
        Ok(self.entities(CatalogKind::Teacher, false).await?)
    }

    async fn active_materials(&self) -> anyhow::Result<Vec<CatalogEntity>> {
        Ok(self.entities(CatalogKind::Material, true).await?)
    }

    async fn active_centers(&self) -> anyhow::Result<Vec<CatalogEntity>> {
        Ok(self.entities(CatalogKind::Center, true).await?)
    }
}

#[async_trait]
impl RegistrationGateway for RestBackend {
    async fn submit(&self, command: &RegisterStudent) -> Result<RegistrationOutcome, BackendError> {
        let reply: RegisterReply = self
            .fetch(self.client.post(self.rpc("register_student")).json(&json!({
                "p_student_name": command.student_name,
                "p_student_phone": command.student_phone,
                "p_parent_phone": command.parent_phone,
                "p_transaction_id": command.transaction_id,
                "p_grade": command.grade,
                "p_center_id": command.center_id,
                "p_material_id": command.material_id,
                "p_teacher_id": command.teacher_id,
                "p_group_name": command.group_name,
                "p_time_slot": command.time_slot,
            })))
            .await?;
        Ok(RegistrationOutcome::from_reply(
            reply.success,
            reply.error_code.as_deref(),
        ))
    }
}

#[async_trait]
impl StudentDirectory for RestBackend {
    async fn query(&self, query: &StudentQuery) -> anyhow::Result<StudentPage> {
        let criteria = &query.criteria;
        let page: StudentPage = self
            .fetch(self.client.post(self.rpc("query_students")).json(&json!({
                "p_page": query.page,
                "p_page_size": query.page_size,
                "p_grade": criteria.grade,
                "p_teacher": criteria.teacher,
                "p_material": criteria.material,
                "p_center_id": criteria.center,
                "p_group_name": criteria.group.as_ref().map(|g| &g.group_name),
                "p_time_slot": criteria.group.as_ref().map(|g| &g.time_slot),
                "p_search": criteria.search_term(),
            })))
            .await?;
        Ok(page)
    }
}

#[async_trait]
impl RegistrationRemover for RestBackend {
    async fn remove_registration(&self, registration_id: &str) -> Result<(), BackendError> {
        self.send(
            self.client
                .delete(self.table(REGISTRATIONS_TABLE))
                .query(&[("id", format!("eq.{registration_id}"))]),
        )
        .await?;
        Ok(())
    }
}

#[derive(Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

#[async_trait]
impl CatalogRepository for RestBackend {
    async fn list(&self, kind: CatalogKind) -> anyhow::Result<Vec<CatalogEntity>> {
        Ok(self.entities(kind, false).await?)
    }

    async fn create(&self, kind: CatalogKind, name: &str) -> Result<CatalogEntity, CatalogError> {
        self.single_entity(
            self.client
                .post(self.table(kind.table()))
                .json(&NameBody { name: name.trim() }),
        )
        .await
    }

    async fn rename(&self, kind: CatalogKind, id: &str, name: &str) -> Result<CatalogEntity, CatalogError> {
        self.single_entity(
            self.client
                .patch(self.table(kind.table()))
                .query(&[("id", format!("eq.{id}"))])
                .json(&NameBody { name: name.trim() }),
        )
        .await
    }

    async fn delete_and_reassign(&self, kind: CatalogKind, id: &str) -> Result<(), CatalogError> {
        let (function, param) = match kind {
            CatalogKind::Teacher => ("delete_teacher_and_reassign", "teacher_id_to_delete"),
            CatalogKind::Material => ("delete_material_and_reassign", "material_id_to_delete"),
            CatalogKind::Center => ("delete_center_and_reassign", "center_id_to_delete"),
        };
        let mut body = serde_json::Map::new();
        body.insert(param.to_string(), json!(id));
        self.send(self.client.post(self.rpc(function)).json(&body))
            .await
            .map_err(catalog_error)?;
        Ok(())
    }
}

#[async_trait]
impl ScheduleRepository for RestBackend {
    async fn list(&self) -> anyhow::Result<Vec<ScheduleRow>> {
        let schedules = self.schedules(false).await?;
        Ok(schedules.into_iter().map(ScheduleWire::into_row).collect())
    }

    async fn save_group(
        &self,
        records: Vec<ScheduleRecord>,
        replacing: Option<&ScheduleGroupKey>,
    ) -> Result<(), CatalogError> {
        self.send(
            self.client
                .post(self.rpc("save_schedule_group"))
                .json(&json!({ "p_records": records, "p_replacing": replacing })),
        )
        .await
        .map_err(catalog_error)?;
        Ok(())
    }

    async fn deactivate(&self, id: &str) -> Result<(), CatalogError> {
        self.send(
            self.client
                .patch(self.table("schedules"))
                .query(&[("id", format!("eq.{id}"))])
                .json(&json!({ "is_active": false })),
        )
        .await?;
        Ok(())
    }
}
