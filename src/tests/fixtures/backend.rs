// Shared test fixture: an in-memory backend with a small timetable.
//
// Centers: General (fallback), Downtown, East Branch.
// Teachers: Mr. Adel, Ms. Samira, Mr. Retired (inactive).
// Materials: Algebra, Pure Math, Applied Math.

use crate::modules::catalog::core::schedule_group::ScheduleRecord;
use crate::modules::registration::core::offering::DEFAULT_CAPACITY;
use crate::modules::registration::use_cases::submit_registration::command::RegisterStudent;
use crate::shared::core::catalog_entity::CatalogEntity;
use crate::shared::core::grade::Grade;
use crate::shared::infrastructure::backend::in_memory::InMemoryBackend;

pub fn schedule(
    id: &str,
    grade: Grade,
    material_id: Option<&str>,
    teacher_id: Option<&str>,
    group_name: &str,
    time_slot: &str,
) -> ScheduleRecord {
    ScheduleRecord {
        id: id.to_string(),
        grade,
        material_id: material_id.map(str::to_string),
        teacher_id: teacher_id.map(str::to_string),
        center_id: "c-downtown".to_string(),
        group_name: group_name.to_string(),
        time_slot: time_slot.to_string(),
        capacity: DEFAULT_CAPACITY,
        is_active: true,
    }
}

pub async fn seeded_backend() -> InMemoryBackend {
    let backend = InMemoryBackend::seeded().await;
    backend.add_center(CatalogEntity::new("c-downtown", "Downtown")).await;
    backend.add_center(CatalogEntity::new("c-east", "East Branch")).await;

    backend.add_teacher(CatalogEntity::new("t-adel", "Mr. Adel")).await;
    backend.add_teacher(CatalogEntity::new("t-samira", "Ms. Samira")).await;
    backend
        .add_teacher(CatalogEntity {
            is_active: false,
            ..CatalogEntity::new("t-retired", "Mr. Retired")
        })
        .await;

    backend.add_material(CatalogEntity::new("m-algebra", "Algebra")).await;
    backend.add_material(CatalogEntity::new("m-pure", "Pure Math")).await;
    backend.add_material(CatalogEntity::new("m-applied", "Applied Math")).await;

    for record in [
        schedule("s-algebra-sat", Grade::First, Some("m-algebra"), Some("t-adel"), "Sat-Tue", "14:00"),
        schedule("s-pure-second", Grade::Second, Some("m-pure"), Some("t-adel"), "Sat-Tue", "16:00"),
        schedule("s-applied-second", Grade::Second, Some("m-applied"), Some("t-samira"), "Sun-Wed", "18:00"),
        schedule("s-pure-third", Grade::Third, Some("m-pure"), Some("t-adel"), "Sun-Wed", "16:00"),
        schedule("s-applied-third", Grade::Third, Some("m-applied"), Some("t-samira"), "Mon-Thu", "18:00"),
        schedule("s-algebra-retired", Grade::First, Some("m-algebra"), Some("t-retired"), "Mon-Thu", "10:00"),
    ] {
        backend.add_schedule(record).await;
    }
    backend
}

/// A first-grade Algebra booking in the `s-algebra-sat` slot.
pub fn register_command(student_phone: &str) -> RegisterStudent {
    RegisterStudent {
        student_name: "Mona Adel".to_string(),
        student_phone: student_phone.to_string(),
        parent_phone: "01198765432".to_string(),
        transaction_id: None,
        grade: Grade::First,
        center_id: "c-downtown".to_string(),
        material_id: Some("m-algebra".to_string()),
        teacher_id: Some("t-adel".to_string()),
        group_name: "Sat-Tue".to_string(),
        time_slot: "14:00".to_string(),
    }
}
