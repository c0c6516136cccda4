//! Random test data generators using the fake crate
//!
//! Provides realistic random data including:
//! - Doctor profiles with plausible names, roles and ratings
//! - Task titles and bodies
//! - Property-based testing strategies

use clinic_core::{NewDoctor, NewTask};
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;

const SERVICE_ROLES: [&str; 6] = [
    "cardiology",
    "dermatology",
    "general-practice",
    "neurology",
    "pediatrics",
    "psychiatry",
];

const NATIONALITIES: [&str; 5] = ["British", "French", "Indian", "Kenyan", "Brazilian"];

/// Generate a realistic service role
pub fn generate_service_role() -> String {
    SERVICE_ROLES[rand::thread_rng().gen_range(0..SERVICE_ROLES.len())].to_string()
}

/// Generate a rating between 1.0 and 5.0 with one decimal
pub fn generate_rating() -> f64 {
    let tenths: u32 = rand::thread_rng().gen_range(10..=50);
    f64::from(tenths) / 10.0
}

/// Generate a random task with realistic data
pub fn generate_new_task() -> NewTask {
    NewTask::new(Sentence(2..6).fake::<String>(), Paragraph(1..3).fake::<String>())
}

/// Generate a random doctor profile
///
/// The text index holds the name and service role, which is what the name
/// search is expected to find.
pub fn generate_new_doctor() -> NewDoctor {
    let mut rng = rand::thread_rng();
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    let service_role = generate_service_role();

    NewDoctor {
        name: format!("Dr. {first} {last}"),
        profile_picture: format!("https://cdn.example.com/{}.png", last.to_lowercase()),
        text_index: format!("{first} {last} {service_role}"),
        service_role,
        rating: generate_rating(),
        rating_count: rng.gen_range(0..500),
        video_introduction_url: String::new(),
        introduction_text: Sentence(5..12).fake(),
        nationalities: NATIONALITIES[rng.gen_range(0..NATIONALITIES.len())].to_string(),
        age: (28..70).fake(),
        university: format!("University of {}", LastName().fake::<String>()),
        gender: if rng.gen_bool(0.5) { "female" } else { "male" }.to_string(),
    }
}

/// Generate `count` random doctors
pub fn generate_new_doctors(count: usize) -> Vec<NewDoctor> {
    (0..count).map(|_| generate_new_doctor()).collect()
}

/// Proptest strategy for task payloads with arbitrary printable text
pub fn new_task_strategy() -> impl Strategy<Value = NewTask> {
    ("[a-zA-Z0-9 %.,!-]{0,40}", "[a-zA-Z0-9 %.,!-]{0,80}")
        .prop_map(|(title, body)| NewTask::new(title, body))
}

/// Proptest strategy for doctor rosters: (rating, gender) pairs
pub fn roster_strategy(max: usize) -> impl Strategy<Value = Vec<(f64, bool)>> {
    prop::collection::vec((0.1f64..5.0, any::<bool>()), 0..max)
}
