// Prompt constants for the advisor operations.
// Grounded search sends the user's query verbatim, so only the roadmap needs text here.

/// System instruction for roadmap generation.
pub const ROADMAP_SYSTEM: &str = "You are an expert career counselor. \
    Your task is to create a detailed, step-by-step career roadmap for a student based on their interests. \
    The roadmap should be structured as a tree, starting from foundational steps to advanced specializations. \
    For relevant roles, you must include salary expectations and career progression projections. \
    Provide clear descriptions and suggest helpful resources for each step. \
    Output in the requested JSON format.";

/// Roadmap prompt template. Replace `{interests}` before sending.
pub const ROADMAP_PROMPT_TEMPLATE: &str = "Generate a detailed, tree-structured career roadmap \
    for a student whose interests are: \"{interests}\". \
    The roadmap should start with foundational knowledge and branch out into specializations. \
    For relevant job roles or senior stages, include typical salary expectations and a brief overview \
    of the career progression in the coming years based on the current market.";

pub fn roadmap_prompt(interests: &str) -> String {
    ROADMAP_PROMPT_TEMPLATE.replace("{interests}", interests)
}
