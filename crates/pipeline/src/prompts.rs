//! Agent identities and task prompts for the four phases. Kept in one place
//! so prompt wording can be tuned without touching phase control flow.

use serde_json::Value;

use agents::AgentSpec;
use reviewsim_core::ReviewerProfile;

const FALLBACK_BACKSTORY: &str = "A generic user interested in the product.";

pub fn product_investigator() -> AgentSpec {
    AgentSpec::new(
        "Product Analysis Specialist",
        "Extract and structure detailed information about a product from its store page",
        "You are an expert at reading online product listings and turning them into \
         clean, structured data. You never invent details that the page does not support.",
    )
}

pub fn persona_designer() -> AgentSpec {
    AgentSpec::new(
        "User Profile Designer",
        "Create diverse, believable consumer profiles to evaluate products",
        "You are a market research specialist who builds realistic consumer archetypes. \
         Your profiles cover different ages, backgrounds and personalities so that a \
         panel of them behaves like a genuine slice of the market.",
    )
}

pub fn reviewer(profile: &ReviewerProfile) -> AgentSpec {
    let backstory = if profile.backstory.trim().is_empty() {
        FALLBACK_BACKSTORY
    } else {
        profile.backstory.as_str()
    };
    AgentSpec::new(
        format!("Product Critic - {}", profile.name),
        "Evaluate the product from your own perspective and write an honest review",
        backstory,
    )
}

pub fn review_analyst() -> AgentSpec {
    AgentSpec::new(
        "Review Analysis Specialist",
        "Compile a collection of product reviews into an aggregate report",
        "You are a data analyst specialised in customer feedback. You find the \
         patterns behind individual opinions and summarise them faithfully, \
         without softening negative signals.",
    )
}

pub fn product_extraction_task(url: &str, page_text: &str) -> String {
    let page_section = if page_text.trim().is_empty() {
        "(page content unavailable; rely on the URL and general knowledge, \
         and leave unknown fields generic)"
            .to_string()
    } else {
        page_text.to_string()
    };
    format!(
        "Visit the product page at {url} and structure the product information as JSON.\n\n\
         Page content (plain text extract):\n---\n{page_section}\n---\n\n\
         Return a single JSON object with these fields:\n\
         - name: product name\n\
         - description: detailed description\n\
         - price: the price as a string, including currency\n\
         - image: URL of the main product image\n\
         - category: product category\n\
         - main_features: array of {{\"label\", \"value\"}} objects for the main features\n\
         - technical_specs: array of {{\"label\", \"value\"}} objects for technical specifications\n\n\
         Use only information supported by the page content. Respond with JSON only."
    )
}

pub fn persona_generation_task(num_reviewers: u32, parameters: Option<&Value>) -> String {
    let constraints = match parameters {
        Some(params) => format!(
            "\n\nProfile constraints (every profile must satisfy them):\n{}",
            serde_json::to_string_pretty(params).unwrap_or_default()
        ),
        None => String::new(),
    };
    format!(
        "Generate exactly {num_reviewers} diverse reviewer profiles to evaluate a product.\n\n\
         Each profile must be a JSON object with:\n\
         - id: unique integer starting at 1\n\
         - name: full name\n\
         - avatar: a fictional profile image URL\n\
         - bio: one-sentence biography\n\
         - age: integer age\n\
         - location: city and country\n\
         - gender: Male, Female or Other\n\
         - education_level: highest education completed\n\
         - personality: object with integer values from 0 to 100 for the traits \
         introvert_extrovert, analytical_creative, busy_free_time, \
         disorganized_organized, independent_cooperative, environmentalist, safe_risky\n\
         - backstory: detailed personal history with relevant experience, \
         interests and purchase motivations{constraints}\n\n\
         The profiles must be varied and represent different market segments.\n\
         Respond with a JSON array of {num_reviewers} profiles only."
    )
}

pub fn review_task(product_json: &str, profile: &ReviewerProfile, index: usize) -> String {
    format!(
        "Review the following product information:\n{product_json}\n\n\
         You are {name}, {age} years old, from {location}.\n\n\
         Write one product review as a JSON object with:\n\
         - id: {index}\n\
         - bot_id: {bot_id}\n\
         - product_id: 1\n\
         - rating: an integer score from 1 to 5 stars\n\
         - title: a short, descriptive headline\n\
         - content: the detailed body of the review\n\n\
         Stay in character. Let your personality and history decide what you \
         praise, what you criticise and the final score. Respond with JSON only.",
        name = profile.name,
        age = profile.age,
        location = profile.location,
        bot_id = profile.id,
    )
}

pub fn analysis_task(reviews_json: &str) -> String {
    format!(
        "Study the following product reviews and produce an aggregate analysis report.\n\n\
         Reviews (JSON):\n{reviews_json}\n\n\
         Return a JSON object with:\n\
         - average_rating: mean rating as a number\n\
         - rating_distribution: array of exactly 5 counts, the number of \
         reviews with 1, 2, 3, 4 and 5 stars in that order\n\
         - positive_points: strengths mentioned across reviews\n\
         - negative_points: weaknesses mentioned across reviews\n\
         - keyword_analysis: array of {{\"word\", \"count\", \"sentiment\"}} objects, \
         where sentiment is \"positive\", \"negative\" or \"neutral\"\n\
         - demographic_insights: notable patterns across reviewer demographics\n\n\
         Respond with JSON only."
    )
}

pub const PRODUCT_EXPECTED: &str = "A single JSON object describing the product.";
pub const PERSONAS_EXPECTED: &str = "A JSON array of reviewer profile objects.";
pub const REVIEW_EXPECTED: &str = "A single JSON object containing the review.";
pub const ANALYSIS_EXPECTED: &str = "A single JSON object containing the aggregate report.";
