//! File System Content Store
//!
//! Reads and writes library entities under a [`LibraryLayout`]:
//! blocks (`blocks/<category>/<name>.md`), profiles (`profiles/<slug>.yml`),
//! agents and commands (`agents/<slug>.md`, `commands/<slug>.md`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_yaml_ng::Mapping;

use crate::domain::entities::{
    block_template, snippet_template, Block, BlockCategory, Profile, ProfileConfig, Snippet,
    SnippetKind,
};
use crate::domain::ports::{ContentStore, FileSystem};
use crate::domain::value_objects::{
    validate_block_slug, validate_entity_slug, validate_version, Fingerprint,
};
use crate::environment::LibraryLayout;
use crate::error::{ContextmarkError, ContextmarkResult, EntityKind};
use crate::infrastructure::fs::LocalFs;
use crate::parser::{extract_frontmatter, parse_metadata};

/// A markdown file split into frontmatter metadata and body
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub path: PathBuf,
    /// Empty when the file has no frontmatter
    pub metadata: Mapping,
    /// Untrimmed body
    pub body: String,
    pub raw: String,
}

/// Content store backed by the library directory
pub struct FsContentStore<F: FileSystem = LocalFs> {
    fs: F,
    layout: LibraryLayout,
}

impl FsContentStore<LocalFs> {
    pub fn new(layout: LibraryLayout) -> Self {
        Self::with_fs(LocalFs::new(), layout)
    }
}

impl<F: FileSystem> FsContentStore<F> {
    pub fn with_fs(fs: F, layout: LibraryLayout) -> Self {
        Self { fs, layout }
    }

    pub fn layout(&self) -> &LibraryLayout {
        &self.layout
    }

    // --- generic entity operations ---

    /// Files directly in `dir` with extension `ext`. Order is unspecified.
    pub fn list_entities(&self, dir: &Path, ext: &str) -> ContextmarkResult<Vec<PathBuf>> {
        Ok(self.fs.list_files(dir, Some(ext))?)
    }

    /// Files anywhere below `dir` with extension `ext`. Order is unspecified.
    pub fn list_entities_recursive(
        &self,
        dir: &Path,
        ext: &str,
    ) -> ContextmarkResult<Vec<PathBuf>> {
        Ok(self.fs.list_files_recursive(dir, Some(ext))?)
    }

    pub fn read_entity(&self, path: &Path) -> ContextmarkResult<Entity> {
        let raw = self.fs.read(path)?;
        let extracted = extract_frontmatter(&raw, path)?;
        let metadata = parse_metadata(extracted.yaml.as_deref(), path)?;
        Ok(Entity {
            path: path.to_path_buf(),
            metadata,
            body: extracted.body,
            raw,
        })
    }

    /// Overwrites; parent directories are created.
    pub fn write_entity(&self, path: &Path, content: &str) -> ContextmarkResult<()> {
        self.fs.write(path, content)?;
        tracing::debug!(path = %path.display(), "wrote library entity");
        Ok(())
    }

    /// Deleting something that is not there is `NotFound`.
    pub fn delete_entity(
        &self,
        path: &Path,
        kind: EntityKind,
        name: &str,
    ) -> ContextmarkResult<()> {
        if !self.fs.exists(path) {
            return Err(ContextmarkError::not_found(kind, name));
        }
        self.fs.remove(path)?;
        tracing::debug!(path = %path.display(), "deleted library entity");
        Ok(())
    }

    // --- blocks ---

    fn block_slug_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.layout.blocks_dir()).ok()?;
        let relative = relative.with_extension("");
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        Some(segments.join("/"))
    }

    /// All blocks, sorted by slug. Files that fail to parse are skipped with a warning.
    pub fn list_blocks(&self) -> ContextmarkResult<Vec<Block>> {
        let mut blocks = Vec::new();
        for path in self.list_entities_recursive(&self.layout.blocks_dir(), "md")? {
            let Some(slug) = self.block_slug_for(&path) else {
                continue;
            };
            match self.fs.read(&path) {
                Ok(raw) => match Block::from_raw(&path, slug, &raw) {
                    Ok(block) => blocks.push(block),
                    Err(e) => tracing::warn!("skipping block {}: {}", path.display(), e),
                },
                Err(e) => tracing::warn!("skipping block {}: {}", path.display(), e),
            }
        }
        blocks.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(blocks)
    }

    /// Blocks grouped by first slug segment, categories sorted by name.
    pub fn list_blocks_by_category(&self) -> ContextmarkResult<Vec<BlockCategory>> {
        let mut grouped: BTreeMap<String, Vec<Block>> = BTreeMap::new();
        for block in self.list_blocks()? {
            grouped
                .entry(block.category().to_string())
                .or_default()
                .push(block);
        }
        Ok(grouped
            .into_iter()
            .map(|(name, blocks)| BlockCategory { name, blocks })
            .collect())
    }

    /// Write a new block from the starter template. The template is parsed
    /// before anything touches disk.
    pub fn create_block(
        &self,
        slug: &str,
        name: &str,
        description: &str,
    ) -> ContextmarkResult<Block> {
        validate_block_slug(slug)?;
        let path = self.layout.block_path(slug);
        if self.fs.exists(&path) {
            return Err(ContextmarkError::validation(format!(
                "Block \"{}\" already exists",
                slug
            )));
        }
        let raw = block_template(name, description)?;
        let block = Block::from_raw(&path, slug, &raw)?;
        self.write_entity(&path, &raw)?;
        Ok(block)
    }

    /// Replace a block's raw file content. The new content must parse and
    /// carry a valid version; nothing is written otherwise.
    pub fn update_block_content(&self, slug: &str, raw: &str) -> ContextmarkResult<Block> {
        let path = self.layout.block_path(slug);
        if !self.fs.exists(&path) {
            return Err(ContextmarkError::not_found(EntityKind::Block, slug));
        }
        let block = Block::from_raw(&path, slug, raw)?;
        validate_version(block.version())?;
        self.write_entity(&path, raw)?;
        Ok(block)
    }

    pub fn delete_block(&self, slug: &str) -> ContextmarkResult<()> {
        self.delete_entity(&self.layout.block_path(slug), EntityKind::Block, slug)
    }

    // --- profiles ---

    fn parse_profile(&self, path: &Path, slug: &str) -> ContextmarkResult<Profile> {
        let content = self.fs.read(path)?;
        let config: ProfileConfig =
            serde_yaml_ng::from_str(&content).map_err(|e| ContextmarkError::InvalidConfig {
                file: path.to_path_buf(),
                message: e.to_string(),
            })?;
        Ok(Profile {
            path: path.to_path_buf(),
            slug: slug.to_string(),
            config,
        })
    }

    /// All profiles, sorted by slug. Unparsable files are skipped with a warning.
    pub fn list_profiles(&self) -> ContextmarkResult<Vec<Profile>> {
        let mut profiles = Vec::new();
        for path in self.list_entities(&self.layout.profiles_dir(), "yml")? {
            let Some(slug) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            match self.parse_profile(&path, &slug) {
                Ok(profile) => profiles.push(profile),
                Err(e) => tracing::warn!("skipping profile {}: {}", path.display(), e),
            }
        }
        profiles.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(profiles)
    }

    pub fn profile_exists(&self, slug: &str) -> bool {
        self.fs.exists(&self.layout.profile_path(slug))
    }

    pub fn create_profile(
        &self,
        slug: &str,
        name: &str,
        description: &str,
        blocks: Vec<String>,
    ) -> ContextmarkResult<Profile> {
        validate_entity_slug("Profile", slug)?;
        for block in &blocks {
            validate_block_slug(block)?;
        }
        if self.profile_exists(slug) {
            return Err(ContextmarkError::validation(format!(
                "Profile \"{}\" already exists",
                slug
            )));
        }
        let profile = Profile {
            path: self.layout.profile_path(slug),
            slug: slug.to_string(),
            config: ProfileConfig::new(name, description, blocks),
        };
        self.save_profile(&profile)?;
        Ok(profile)
    }

    pub fn save_profile(&self, profile: &Profile) -> ContextmarkResult<()> {
        let yaml = serde_yaml_ng::to_string(&profile.config)?;
        self.write_entity(&self.layout.profile_path(&profile.slug), &yaml)
    }

    pub fn delete_profile(&self, slug: &str) -> ContextmarkResult<()> {
        self.delete_entity(&self.layout.profile_path(slug), EntityKind::Profile, slug)
    }

    /// Append a block to a profile. Returns false when it was already listed.
    pub fn add_block_to_profile(
        &self,
        profile_slug: &str,
        block_slug: &str,
    ) -> ContextmarkResult<bool> {
        validate_block_slug(block_slug)?;
        if !self.block_exists(block_slug)? {
            return Err(ContextmarkError::not_found(EntityKind::Block, block_slug));
        }
        let mut profile = self.load_profile(profile_slug)?;
        let added = profile.config.add_block(block_slug);
        if added {
            self.save_profile(&profile)?;
        }
        Ok(added)
    }

    /// Returns false when the block was not listed.
    pub fn remove_block_from_profile(
        &self,
        profile_slug: &str,
        block_slug: &str,
    ) -> ContextmarkResult<bool> {
        let mut profile = self.load_profile(profile_slug)?;
        let removed = profile.config.remove_block(block_slug);
        if removed {
            self.save_profile(&profile)?;
        }
        Ok(removed)
    }

    // --- agents and commands ---

    pub fn snippet_path(&self, kind: SnippetKind, slug: &str) -> PathBuf {
        match kind {
            SnippetKind::Agent => self.layout.agent_path(slug),
            SnippetKind::Command => self.layout.command_path(slug),
        }
    }

    fn snippet_dir(&self, kind: SnippetKind) -> PathBuf {
        match kind {
            SnippetKind::Agent => self.layout.agents_dir(),
            SnippetKind::Command => self.layout.commands_dir(),
        }
    }

    fn parse_snippet(
        &self,
        kind: SnippetKind,
        path: &Path,
        slug: &str,
    ) -> ContextmarkResult<Snippet> {
        let raw = self.fs.read(path)?;
        Snippet::from_raw(kind, path, slug, &raw)
    }

    pub fn list_snippets(&self, kind: SnippetKind) -> ContextmarkResult<Vec<Snippet>> {
        let mut snippets = Vec::new();
        for path in self.list_entities(&self.snippet_dir(kind), "md")? {
            let Some(slug) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            match self.parse_snippet(kind, &path, &slug) {
                Ok(snippet) => snippets.push(snippet),
                Err(e) => tracing::warn!(
                    "skipping {} {}: {}",
                    kind.entity_kind().as_str(),
                    path.display(),
                    e
                ),
            }
        }
        snippets.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(snippets)
    }

    pub fn load_snippet(&self, kind: SnippetKind, slug: &str) -> ContextmarkResult<Snippet> {
        let path = self.snippet_path(kind, slug);
        if !self.fs.exists(&path) {
            return Err(ContextmarkError::not_found(kind.entity_kind(), slug));
        }
        self.parse_snippet(kind, &path, slug)
    }

    pub fn snippet_exists(&self, kind: SnippetKind, slug: &str) -> bool {
        self.fs.exists(&self.snippet_path(kind, slug))
    }

    pub fn create_snippet(
        &self,
        kind: SnippetKind,
        slug: &str,
        name: &str,
        description: &str,
    ) -> ContextmarkResult<Snippet> {
        validate_entity_slug(kind.label(), slug)?;
        if self.snippet_exists(kind, slug) {
            return Err(ContextmarkError::validation(format!(
                "{} \"{}\" already exists",
                kind.label(),
                slug
            )));
        }
        let path = self.snippet_path(kind, slug);
        let raw = snippet_template(kind, name, description)?;
        let snippet = Snippet::from_raw(kind, &path, slug, &raw)?;
        self.write_entity(&path, &raw)?;
        Ok(snippet)
    }

    pub fn delete_snippet(&self, kind: SnippetKind, slug: &str) -> ContextmarkResult<()> {
        self.delete_entity(&self.snippet_path(kind, slug), kind.entity_kind(), slug)
    }
}

impl<F: FileSystem> ContentStore for FsContentStore<F> {
    fn load_block(&self, slug: &str) -> ContextmarkResult<Block> {
        let path = self.layout.block_path(slug);
        if !self.fs.exists(&path) {
            return Err(ContextmarkError::not_found(EntityKind::Block, slug));
        }
        let raw = self.fs.read(&path)?;
        Block::from_raw(&path, slug, &raw)
    }

    fn block_fingerprint(&self, slug: &str) -> ContextmarkResult<Option<Fingerprint>> {
        let path = self.layout.block_path(slug);
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        Ok(Some(Fingerprint::of(&self.fs.read_bytes(&path)?)))
    }

    fn load_profile(&self, slug: &str) -> ContextmarkResult<Profile> {
        let path = self.layout.profile_path(slug);
        if !self.fs.exists(&path) {
            return Err(ContextmarkError::not_found(EntityKind::Profile, slug));
        }
        self.parse_profile(&path, slug)
    }

    fn global_context(&self) -> ContextmarkResult<Option<String>> {
        let path = self.layout.global_context_file();
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        let content = self.fs.read(&path)?;
        let trimmed = content.trim();
        Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{tempdir, TempDir};

    fn store() -> (TempDir, FsContentStore) {
        let dir = tempdir().unwrap();
        let store = FsContentStore::new(LibraryLayout::new(dir.path()));
        (dir, store)
    }

    #[test]
    fn create_then_load_block() {
        let (_dir, store) = store();
        let created = store.create_block("style/code", "Code Style", "Conventions").unwrap();

        let loaded = store.load_block("style/code").unwrap();

        assert_eq!(created, loaded);
        assert_eq!(loaded.version(), "1.0.0");
        assert!(loaded.path.ends_with("blocks/style/code.md"));
    }

    #[test]
    fn create_block_rejects_bad_slug_before_writing() {
        let (dir, store) = store();

        let err = store.create_block("nocategory", "X", "Y").unwrap_err();

        assert!(matches!(err, ContextmarkError::Validation { .. }));
        assert!(!dir.path().join("blocks").exists());
    }

    #[test]
    fn create_block_twice_fails() {
        let (_dir, store) = store();
        store.create_block("style/code", "A", "B").unwrap();

        let err = store.create_block("style/code", "A", "B").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn create_block_accepts_yaml_syntax_in_name() {
        let (_dir, store) = store();

        let created = store.create_block("style/code", "Style: Code", "Conventions").unwrap();

        assert_eq!(created.frontmatter.name, "Style: Code");
        assert_eq!(store.load_block("style/code").unwrap(), created);
    }

    #[test]
    fn create_block_with_empty_description_loads() {
        let (_dir, store) = store();

        store.create_block("style/empty", "Empty", "").unwrap();

        assert_eq!(store.load_block("style/empty").unwrap().frontmatter.description, "");
    }

    #[test]
    fn create_snippet_with_empty_description_loads() {
        let (_dir, store) = store();

        store.create_snippet(SnippetKind::Agent, "rev", "Rev: strict", "").unwrap();

        let agent = store.load_snippet(SnippetKind::Agent, "rev").unwrap();
        assert_eq!(agent.frontmatter.name, "Rev: strict");
        assert_eq!(agent.frontmatter.description, "");
    }

    #[test]
    fn load_missing_block_is_not_found() {
        let (_dir, store) = store();
        let err = store.load_block("team/missing").unwrap_err();
        assert_eq!(err.to_string(), "Block \"team/missing\" not found.");
        assert!(store.find_block("team/missing").unwrap().is_none());
    }

    #[test]
    fn list_blocks_groups_by_category() {
        let (_dir, store) = store();
        store.create_block("style/code", "Code", "").unwrap();
        store.create_block("laravel/base", "Base", "").unwrap();
        store.create_block("laravel/api", "Api", "").unwrap();

        let slugs: Vec<_> = store.list_blocks().unwrap().into_iter().map(|b| b.slug).collect();
        assert_eq!(slugs, vec!["laravel/api", "laravel/base", "style/code"]);

        let categories = store.list_blocks_by_category().unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].name, "laravel");
        assert_eq!(categories[0].blocks.len(), 2);
    }

    #[test]
    fn list_blocks_skips_unparsable_files() {
        let (dir, store) = store();
        store.create_block("style/code", "Code", "").unwrap();
        std::fs::write(dir.path().join("blocks/style/broken.md"), "---\nname: x\n").unwrap();
        std::fs::write(dir.path().join("blocks/style/notes.txt"), "ignored").unwrap();

        let blocks = store.list_blocks().unwrap();
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn update_block_content_validates_version() {
        let (_dir, store) = store();
        store.create_block("style/code", "Code", "").unwrap();
        let before = store.load_block("style/code").unwrap();

        let bad = "---\nname: Code\ndescription: d\nversion: 1.0\n---\nBody\n";
        let err = store.update_block_content("style/code", bad).unwrap_err();
        assert!(matches!(err, ContextmarkError::Validation { .. }));
        assert_eq!(store.load_block("style/code").unwrap().hash, before.hash);

        let good = "---\nname: Code\ndescription: d\nversion: 1.1.0\n---\nBody\n";
        let updated = store.update_block_content("style/code", good).unwrap();
        assert_eq!(updated.version(), "1.1.0");
        assert_ne!(updated.hash, before.hash);
    }

    #[test]
    fn delete_missing_entity_is_not_found() {
        let (_dir, store) = store();
        let err = store.delete_block("style/ghost").unwrap_err();
        assert!(matches!(err, ContextmarkError::NotFound { kind: EntityKind::Block, .. }));

        let err = store.delete_profile("ghost").unwrap_err();
        assert!(matches!(err, ContextmarkError::NotFound { kind: EntityKind::Profile, .. }));
    }

    #[test]
    fn read_entity_without_frontmatter_has_empty_metadata() {
        let (dir, store) = store();
        let path = dir.path().join("notes.md");
        store.write_entity(&path, "just text\n").unwrap();

        let entity = store.read_entity(&path).unwrap();
        assert!(entity.metadata.is_empty());
        assert_eq!(entity.body, "just text\n");
    }

    #[test]
    fn profile_crud_and_block_membership() {
        let (_dir, store) = store();
        store.create_block("style/code", "Code", "").unwrap();
        store
            .create_profile("default", "Default", "Minimal", vec![])
            .unwrap();

        assert!(store.add_block_to_profile("default", "style/code").unwrap());
        assert!(!store.add_block_to_profile("default", "style/code").unwrap());
        assert_eq!(store.load_profile("default").unwrap().config.blocks, vec!["style/code"]);

        let err = store.add_block_to_profile("default", "style/ghost").unwrap_err();
        assert!(err.is_not_found());

        assert!(store.remove_block_from_profile("default", "style/code").unwrap());
        assert!(store.load_profile("default").unwrap().config.blocks.is_empty());

        let listed = store.list_profiles().unwrap();
        assert_eq!(listed.len(), 1);
        store.delete_profile("default").unwrap();
        assert!(!store.profile_exists("default"));
    }

    #[test]
    fn profile_with_stale_block_still_loads() {
        let (dir, store) = store();
        std::fs::create_dir_all(dir.path().join("profiles")).unwrap();
        std::fs::write(
            dir.path().join("profiles/stale.yml"),
            "name: Stale\ndescription: x\nblocks:\n  - team/missing\n",
        )
        .unwrap();

        let profile = store.load_profile("stale").unwrap();
        assert_eq!(profile.config.blocks, vec!["team/missing"]);
    }

    #[test]
    fn snippets_round_trip_through_templates() {
        let (_dir, store) = store();
        store
            .create_snippet(SnippetKind::Agent, "reviewer", "Reviewer", "Reviews diffs")
            .unwrap();
        store
            .create_snippet(SnippetKind::Command, "ship", "Ship", "Ship it")
            .unwrap();

        let agent = store.load_snippet(SnippetKind::Agent, "reviewer").unwrap();
        assert_eq!(agent.frontmatter.description, "Reviews diffs");
        assert!(agent.path.ends_with("agents/reviewer.md"));

        assert_eq!(store.list_snippets(SnippetKind::Command).unwrap().len(), 1);
        let agents = store.list_snippets(SnippetKind::Agent).unwrap();
        assert!(agents[0].content.starts_with("# Reviewer"));

        let err = store.load_snippet(SnippetKind::Command, "nope").unwrap_err();
        assert_eq!(err.to_string(), "Command \"nope\" not found.");

        store.delete_snippet(SnippetKind::Agent, "reviewer").unwrap();
        assert!(!store.snippet_exists(SnippetKind::Agent, "reviewer"));
    }

    #[test]
    fn global_context_is_trimmed_and_optional() {
        let (dir, store) = store();
        assert_eq!(store.global_context().unwrap(), None);

        std::fs::create_dir_all(dir.path().join("global")).unwrap();
        std::fs::write(dir.path().join("global/CLAUDE.md"), "  \n").unwrap();
        assert_eq!(store.global_context().unwrap(), None);

        std::fs::write(dir.path().join("global/CLAUDE.md"), "\n# Me\n\n").unwrap();
        assert_eq!(store.global_context().unwrap().as_deref(), Some("# Me"));
    }
}
