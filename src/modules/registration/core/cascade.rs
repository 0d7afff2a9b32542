// Cascading filter engine for the registration form.
//
// Recomputes every dropdown from the cached offerings in the fixed order
// Center -> Grade -> Material -> Teacher -> Group/Time. Each step narrows the
// remaining offerings by the upstream choice, derives its own options from what is
// left, and clears its own choice when it is no longer among those options.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::modules::registration::core::availability::Availability;
use crate::modules::registration::core::offering::Offering;
use crate::modules::registration::core::schedule_cache::ScheduleCache;
use crate::modules::registration::core::selection::Selection;
use crate::shared::core::grade::Grade;
use crate::shared::core::reference::RefKey;
use crate::shared::core::time_label::parse_time_slot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption<K> {
    pub value: K,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupTimeOption {
    pub offering_id: String,
    pub group_name: String,
    pub time_slot: String,
    pub label: String,
    pub availability: Availability,
    pub registered: u32,
    pub capacity: u32,
}

impl From<&Offering> for GroupTimeOption {
    fn from(offering: &Offering) -> Self {
        Self {
            offering_id: offering.id.clone(),
            group_name: offering.group_name.clone(),
            time_slot: offering.time_slot.clone(),
            label: offering.label(),
            availability: offering.availability(),
            registered: offering.registered,
            capacity: offering.capacity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeOptions {
    pub enabled: bool,
    pub centers: Vec<ChoiceOption<String>>,
    pub grades: Vec<ChoiceOption<Grade>>,
    pub materials: Vec<ChoiceOption<RefKey>>,
    pub teachers: Vec<ChoiceOption<RefKey>>,
    pub group_times: Vec<GroupTimeOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeResult {
    pub options: CascadeOptions,
    /// The input selection with every stale choice cleared.
    pub selection: Selection,
}

pub fn cascade(
    cache: &ScheduleCache,
    selection: &Selection,
    excluded_material: Option<&str>,
) -> CascadeResult {
    if !cache.is_ready() {
        return CascadeResult {
            options: CascadeOptions::default(),
            selection: Selection::default(),
        };
    }

    let mut selection = selection.clone();
    let mut remaining: Vec<&Offering> = cache
        .offerings()
        .iter()
        .filter(|o| o.bookable())
        .filter(|o| match excluded_material {
            Some(excluded) => o.material_key().as_id() != Some(excluded),
            None => true,
        })
        .collect();

    let mut centers: Vec<ChoiceOption<String>> = cache
        .centers()
        .iter()
        .filter(|c| c.is_active && !c.is_fallback())
        .map(|c| ChoiceOption {
            value: c.id.clone(),
            label: c.name.clone(),
        })
        .collect();
    centers.sort_by(|a, b| a.label.cmp(&b.label));
    keep_if_offered(&mut selection.center, &centers);
    if let Some(center) = &selection.center {
        remaining.retain(|o| &o.center.id == center);
    }

    let grades: Vec<ChoiceOption<Grade>> = distinct(&remaining, |o| {
        (o.grade, o.grade.display_name().to_string())
    })
    .into_iter()
    .map(|(value, label)| ChoiceOption { value, label })
    .collect();
    keep_if_offered(&mut selection.grade, &grades);
    if let Some(grade) = selection.grade {
        remaining.retain(|o| o.grade == grade);
    }

    let materials = sorted_by_label(distinct(&remaining, |o| {
        (o.material_key(), o.material_name().to_string())
    }));
    keep_if_offered(&mut selection.material, &materials);
    if let Some(material) = &selection.material {
        remaining.retain(|o| &o.material_key() == material);
    }

    let teachers = sorted_by_label(distinct(&remaining, |o| {
        (o.teacher_key(), o.teacher_name().to_string())
    }));
    keep_if_offered(&mut selection.teacher, &teachers);
    if let Some(teacher) = &selection.teacher {
        remaining.retain(|o| &o.teacher_key() == teacher);
    }

    remaining.sort_by(|a, b| {
        a.group_name
            .cmp(&b.group_name)
            .then_with(|| parse_time_slot(&a.time_slot).cmp(&parse_time_slot(&b.time_slot)))
            .then_with(|| a.time_slot.cmp(&b.time_slot))
    });
    let group_times: Vec<GroupTimeOption> = remaining.into_iter().map(Into::into).collect();
    let offered = |id: &String| group_times.iter().any(|g| &g.offering_id == id);
    if !selection.offering.as_ref().is_none_or(offered) {
        selection.offering = None;
    }

    CascadeResult {
        options: CascadeOptions {
            enabled: true,
            centers,
            grades,
            materials,
            teachers,
            group_times,
        },
        selection,
    }
}

/// Distinct keys among the offerings, keyed by identity rather than label.
fn distinct<K: Ord>(
    offerings: &[&Offering],
    key: impl Fn(&Offering) -> (K, String),
) -> Vec<(K, String)> {
    let mut seen: BTreeMap<K, String> = BTreeMap::new();
    for offering in offerings.iter().copied() {
        let (k, label) = key(offering);
        seen.entry(k).or_insert(label);
    }
    seen.into_iter().collect()
}

fn sorted_by_label(entries: Vec<(RefKey, String)>) -> Vec<ChoiceOption<RefKey>> {
    let mut options: Vec<ChoiceOption<RefKey>> = entries
        .into_iter()
        .map(|(value, label)| ChoiceOption { value, label })
        .collect();
    options.sort_by(|a, b| a.label.cmp(&b.label).then_with(|| a.value.cmp(&b.value)));
    options
}

fn keep_if_offered<K: PartialEq>(choice: &mut Option<K>, options: &[ChoiceOption<K>]) {
    let offered = |value: &K| options.iter().any(|o| &o.value == value);
    if !choice.as_ref().is_none_or(offered) {
        *choice = None;
    }
}

#[cfg(test)]
mod cascade_tests {
    use super::*;
    use crate::modules::registration::core::selection::SelectionChange;
    use crate::modules::registration::core::schedule_cache::CatalogSnapshot;
    use crate::shared::core::catalog_entity::CatalogEntity;
    use crate::tests::fixtures::offerings::OfferingBuilder;
    use rstest::{fixture, rstest};

    fn cache_of(offerings: Vec<Offering>) -> ScheduleCache {
        let mut cache = ScheduleCache::new();
        cache.replace(CatalogSnapshot {
            offerings,
            teachers: vec![],
            materials: vec![],
            centers: vec![
                CatalogEntity::new("c-1", "C1"),
                CatalogEntity::new("c-2", "C2"),
                CatalogEntity::new("c-0", "General"),
            ],
        });
        cache
    }

    #[fixture]
    fn before_each() -> ScheduleCache {
        cache_of(vec![
            OfferingBuilder::new()
                .id("o-1")
                .center("c-1", "C1")
                .grade(Grade::First)
                .material("m-1", "Algebra")
                .teacher("t-1", "T1")
                .group("Sat-Tue")
                .time("14:00")
                .build(),
            OfferingBuilder::new()
                .id("o-2")
                .center("c-1", "C1")
                .grade(Grade::First)
                .material("m-1", "Algebra")
                .teacher("t-1", "T1")
                .group("Sat-Tue")
                .time("10:00")
                .build(),
            OfferingBuilder::new()
                .id("o-3")
                .center("c-1", "C1")
                .grade(Grade::Second)
                .material("m-2", "Pure Math")
                .teacher("t-2", "T2")
                .group("Sun-Wed")
                .time("16:00")
                .build(),
            OfferingBuilder::new()
                .id("o-4")
                .center("c-2", "C2")
                .grade(Grade::Second)
                .material("m-3", "Applied Math")
                .general_teacher()
                .group("Mon-Thu")
                .time("12:00")
                .build(),
            OfferingBuilder::new()
                .id("o-5")
                .center("c-2", "C2")
                .grade(Grade::Second)
                .material("m-3", "Applied Math")
                .teacher("t-9", "Retired")
                .inactive_teacher()
                .build(),
        ])
    }

    fn ids(result: &CascadeResult) -> Vec<&str> {
        result
            .options
            .group_times
            .iter()
            .map(|g| g.offering_id.as_str())
            .collect()
    }

    #[rstest]
    fn it_should_list_a_single_full_slot_for_the_exact_tuple() {
        let cache = cache_of(vec![
            OfferingBuilder::new()
                .center("c-1", "C1")
                .grade(Grade::First)
                .material("m-1", "Algebra")
                .teacher("t-1", "T1")
                .group("Sat-Tue")
                .time("14:00")
                .capacity(10)
                .registered(10)
                .build(),
        ]);
        let selection = Selection {
            center: Some("c-1".into()),
            grade: Some(Grade::First),
            material: Some(RefKey::Id("m-1".into())),
            teacher: Some(RefKey::Id("t-1".into())),
            offering: None,
        };
        let result = cascade(&cache, &selection, None);
        assert_eq!(result.options.group_times.len(), 1);
        assert_eq!(result.options.group_times[0].group_name, "Sat-Tue");
        assert_eq!(result.options.group_times[0].availability, Availability::Full);
    }

    #[rstest]
    fn it_should_hide_the_fallback_center(before_each: ScheduleCache) {
        let result = cascade(&before_each, &Selection::default(), None);
        let centers: Vec<&str> = result.options.centers.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(centers, vec!["c-1", "c-2"]);
    }

    #[rstest]
    fn it_should_deduplicate_materials_by_id(before_each: ScheduleCache) {
        let selection = Selection {
            center: Some("c-1".into()),
            grade: Some(Grade::First),
            ..Selection::default()
        };
        let result = cascade(&before_each, &selection, None);
        assert_eq!(result.options.materials.len(), 1);
        assert_eq!(result.options.materials[0].label, "Algebra");
        assert_eq!(ids(&result), vec!["o-2", "o-1"]);
    }

    #[rstest]
    fn it_should_never_offer_an_inactive_teacher(before_each: ScheduleCache) {
        let selection = Selection {
            center: Some("c-2".into()),
            ..Selection::default()
        };
        let result = cascade(&before_each, &selection, None);
        let teachers: Vec<&RefKey> = result.options.teachers.iter().map(|t| &t.value).collect();
        assert_eq!(teachers, vec![&RefKey::General]);
        assert_eq!(ids(&result), vec!["o-4"]);
    }

    #[rstest]
    fn it_should_clear_a_stale_downstream_choice(before_each: ScheduleCache) {
        let selection = Selection {
            center: Some("c-1".into()),
            grade: Some(Grade::First),
            material: Some(RefKey::Id("m-2".into())),
            teacher: Some(RefKey::Id("t-2".into())),
            offering: Some("o-3".into()),
        };
        let result = cascade(&before_each, &selection, None);
        assert_eq!(result.selection.material, None);
        assert_eq!(result.selection.teacher, None);
        assert_eq!(result.selection.offering, None);
        assert_eq!(ids(&result), vec!["o-2", "o-1"]);
    }

    #[rstest]
    fn it_should_widen_the_slots_when_an_upstream_choice_is_cleared(before_each: ScheduleCache) {
        let selection = Selection {
            center: Some("c-1".into()),
            grade: None,
            ..Selection::default()
        };
        let result = cascade(&before_each, &selection, None);
        assert_eq!(ids(&result), vec!["o-2", "o-1", "o-3"]);
    }

    fn select_in_order(cache: &ScheduleCache, changes: Vec<SelectionChange>) -> CascadeResult {
        let mut result = cascade(cache, &Selection::default(), None);
        for change in changes {
            let mut selection = result.selection.clone();
            selection.apply(change);
            result = cascade(cache, &selection, None);
        }
        result
    }

    #[rstest]
    fn it_should_yield_the_same_slots_whatever_the_selection_order(before_each: ScheduleCache) {
        let center = || SelectionChange::Center(Some("c-1".into()));
        let grade = || SelectionChange::Grade(Some(Grade::Second));
        let material = || SelectionChange::Material(Some(RefKey::Id("m-2".into())));

        let forward = select_in_order(&before_each, vec![center(), grade(), material()]);
        let backward = select_in_order(&before_each, vec![material(), grade(), center()]);
        let shuffled = select_in_order(&before_each, vec![grade(), center(), material()]);

        assert_eq!(ids(&forward), vec!["o-3"]);
        assert_eq!(ids(&backward), ids(&forward));
        assert_eq!(ids(&shuffled), ids(&forward));
        assert_eq!(backward.selection, forward.selection);
    }

    #[rstest]
    fn it_should_exclude_the_first_math_material(before_each: ScheduleCache) {
        let selection = Selection {
            grade: Some(Grade::Second),
            ..Selection::default()
        };
        let result = cascade(&before_each, &selection, Some("m-2"));
        let materials: Vec<&str> = result.options.materials.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(materials, vec!["Applied Math"]);
        assert!(!ids(&result).contains(&"o-3"));
    }

    #[rstest]
    fn it_should_disable_everything_until_the_cache_is_ready() {
        let mut cache = ScheduleCache::new();
        cache.fail("offline");
        let selection = Selection {
            center: Some("c-1".into()),
            ..Selection::default()
        };
        let result = cascade(&cache, &selection, None);
        assert!(!result.options.enabled);
        assert!(result.options.centers.is_empty());
        assert!(result.options.group_times.is_empty());
        assert_eq!(result.selection, Selection::default());
    }

    #[rstest]
    fn it_should_keep_a_valid_group_time_choice(before_each: ScheduleCache) {
        let selection = Selection {
            center: Some("c-1".into()),
            offering: Some("o-3".into()),
            ..Selection::default()
        };
        let result = cascade(&before_each, &selection, None);
        assert_eq!(result.selection.offering.as_deref(), Some("o-3"));
    }
}
