use serde::Serialize;

use crate::modules::registration::core::math::MathSubject;
use crate::shared::core::grade::Grade;

pub const CENTER_CARD_FEE: u32 = 30;

const FIRST_GRADE_MATH_MARKERS: [&str; 2] = ["math", "الرياضيات"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MaterialFee {
    pub material_name: String,
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeeQuote {
    pub center_fee: u32,
    pub materials: Vec<MaterialFee>,
    pub total: u32,
}

pub fn material_fee(grade: Grade, material_name: &str) -> u32 {
    match (grade, MathSubject::detect(material_name)) {
        (Grade::Second, Some(MathSubject::Pure)) => 25,
        (Grade::Second, Some(MathSubject::Applied)) => 50,
        (Grade::Third, Some(MathSubject::Pure)) => 30,
        (Grade::Third, Some(MathSubject::Applied)) => 55,
        (Grade::First, _) => {
            let name = material_name.to_lowercase();
            if FIRST_GRADE_MATH_MARKERS.iter().any(|m| name.contains(m)) {
                25
            } else {
                0
            }
        }
        _ => 0,
    }
}

/// One center card plus every listed material.
pub fn quote<'a>(grade: Grade, material_names: impl IntoIterator<Item = &'a str>) -> FeeQuote {
    let materials: Vec<MaterialFee> = material_names
        .into_iter()
        .map(|name| MaterialFee {
            material_name: name.to_string(),
            amount: material_fee(grade, name),
        })
        .collect();
    let total = CENTER_CARD_FEE + materials.iter().map(|m| m.amount).sum::<u32>();
    FeeQuote {
        center_fee: CENTER_CARD_FEE,
        materials,
        total,
    }
}
