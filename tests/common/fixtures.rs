//! Test fixtures - reusable content for library entities.

/// Body of the first version of `laravel/base`
pub const LARAVEL_BASE_BODY: &str = "## Laravel\n\n- Use Eloquent scopes for reusable queries\n- Keep controllers thin";

/// Body of `team/review`
pub const TEAM_REVIEW_BODY: &str = "## Review\n\nEvery change gets a second pair of eyes.";

/// A small agent definition
pub const REVIEWER_AGENT: &str = "---\nname: reviewer\ndescription: Reviews pull requests\n---\n\nYou review code carefully.\n";

/// A small command definition
pub const DEPLOY_COMMAND: &str = "---\nname: deploy\ndescription: Deploys the app\n---\n\nRun the deploy script.\n";

/// Raw block file with the given frontmatter version and body
pub fn block_file(name: &str, version: &str, body: &str) -> String {
    format!(
        "---\nname: {name}\ndescription: {name} conventions\nversion: {version}\ntags: []\n---\n\n{body}\n"
    )
}

/// Raw profile YAML listing `blocks` in order
pub fn profile_file(name: &str, blocks: &[&str]) -> String {
    let mut yaml = format!("name: {name}\ndescription: {name} profile\n");
    if blocks.is_empty() {
        yaml.push_str("blocks: []\n");
        return yaml;
    }
    yaml.push_str("blocks:\n");
    for block in blocks {
        yaml.push_str(&format!("  - {block}\n"));
    }
    yaml
}
