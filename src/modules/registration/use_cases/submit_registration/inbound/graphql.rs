use async_graphql::{Context, Object, Result as GqlResult, SimpleObject};

use crate::modules::registration::core::availability::Availability;
use crate::modules::registration::core::cascade::{
    CascadeOptions, ChoiceOption, GroupTimeOption, cascade,
};
use crate::modules::registration::core::schedule_cache::ScheduleCache;
use crate::modules::registration::core::selection::Selection;
use crate::modules::registration::use_cases::load_offerings::handler::LoadOfferingsHandler;
use crate::shared::core::grade::Grade;
use crate::shared::core::reference::RefKey;
use crate::shell::state::AppState;

#[derive(SimpleObject, Clone)]
pub struct GqlChoice {
    pub value: String,
    pub label: String,
}

#[derive(SimpleObject, Clone)]
pub struct GqlGradeChoice {
    pub value: Grade,
    pub label: String,
}

#[derive(SimpleObject, Clone)]
pub struct GqlGroupTime {
    pub offering_id: String,
    pub group_name: String,
    pub time_slot: String,
    pub label: String,
    pub availability: Availability,
    pub registered: u32,
    pub capacity: u32,
}

#[derive(SimpleObject, Clone)]
pub struct GqlRegistrationOptions {
    pub centers: Vec<GqlChoice>,
    pub grades: Vec<GqlGradeChoice>,
    pub materials: Vec<GqlChoice>,
    pub teachers: Vec<GqlChoice>,
    pub group_times: Vec<GqlGroupTime>,
}

impl From<ChoiceOption<String>> for GqlChoice {
    fn from(v: ChoiceOption<String>) -> Self {
        Self {
            value: v.value,
            label: v.label,
        }
    }
}

impl From<ChoiceOption<RefKey>> for GqlChoice {
    fn from(v: ChoiceOption<RefKey>) -> Self {
        Self {
            value: v.value.into(),
            label: v.label,
        }
    }
}

impl From<GroupTimeOption> for GqlGroupTime {
    fn from(v: GroupTimeOption) -> Self {
        Self {
            offering_id: v.offering_id,
            group_name: v.group_name,
            time_slot: v.time_slot,
            label: v.label,
            availability: v.availability,
            registered: v.registered,
            capacity: v.capacity,
        }
    }
}

impl From<CascadeOptions> for GqlRegistrationOptions {
    fn from(v: CascadeOptions) -> Self {
        Self {
            centers: v.centers.into_iter().map(Into::into).collect(),
            grades: v
                .grades
                .into_iter()
                .map(|g| GqlGradeChoice {
                    value: g.value,
                    label: g.label,
                })
                .collect(),
            materials: v.materials.into_iter().map(Into::into).collect(),
            teachers: v.teachers.into_iter().map(Into::into).collect(),
            group_times: v.group_times.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Default)]
pub struct RegistrationQuery;

#[Object]
impl RegistrationQuery {
    /// Dropdown options for a partial selection, computed from a fresh load.
    async fn registration_options(
        &self,
        context: &Context<'_>,
        center: Option<String>,
        grade: Option<Grade>,
        material: Option<String>,
        teacher: Option<String>,
    ) -> GqlResult<GqlRegistrationOptions> {
        let state = context.data_unchecked::<AppState>();
        let mut cache = ScheduleCache::new();
        LoadOfferingsHandler::new(state.offerings.clone())
            .handle(&mut cache)
            .await
            .map_err(|e| async_graphql::Error::new(e.to_string()))?;

        let selection = Selection {
            center,
            grade,
            material: material.map(RefKey::from),
            teacher: teacher.map(RefKey::from),
            offering: None,
        };
        Ok(cascade(&cache, &selection, None).options.into())
    }
}
