//! Validation, materialisation, and execution of a build (C6, C7).

use {
    crate::{
        cache,
        definition::{BuildConfig, TargetDefinition, TargetDefinitionKind},
        error::{ContextError, ExecuteError, ValidationError},
        hash,
        target::{Target, TargetId, TargetKind},
    },
    otter_util::basename::Basename,
    std::{collections::HashMap, path::PathBuf},
};

/// Capability a [`BuildContext`] needs in order to actually run a
/// target's command.
///
/// This is implemented by `otter-actions`'s `ProcessRunner`. Keeping it
/// as a trait rather than calling `otter-actions` directly lets the
/// graph executor (C6) be exercised in tests against a fake that never
/// spawns a real `cc`.
pub trait Spawn
{
    /// Run the static analyser over `sources`, passing `include_tokens`
    /// after a `--` separator. Must be a no-op success if `sources` is
    /// empty.
    fn run_linter(&self, target_name: &str, sources: &[PathBuf], include_tokens: &[String])
        -> Result<(), ExecuteError>;

    /// Run `argv` to completion, inheriting the environment.
    fn run_command(&self, target_name: &str, argv: &[String]) -> Result<(), ExecuteError>;
}

/// Owns every [`Target`] of a single build, along with the
/// configuration they were materialised from.
pub struct BuildContext
{
    targets: Vec<Target>,
    by_name: HashMap<String, TargetId>,
    /// Order the definitions were declared in; `build_all` iterates
    /// this, not `targets`' storage order (the two agree, but keeping
    /// this explicit documents that declaration order is load-bearing).
    order: Vec<TargetId>,
}

impl BuildContext
{
    /// Validate `definitions`, then materialise them against `config`.
    ///
    /// On any failure, no targets are left half-constructed: `targets`
    /// (and every resource it holds) is simply dropped along with this
    /// function's local state when it returns `Err`.
    pub fn create(definitions: &[TargetDefinition], config: &BuildConfig)
        -> Result<Self, ContextError>
    {
        validate(definitions)?;

        let by_name: HashMap<String, TargetId> = definitions.iter().enumerate()
            .map(|(i, def)| (def.name.clone(), TargetId(i)))
            .collect();

        let mut targets = Vec::with_capacity(definitions.len());
        for def in definitions {
            targets.push(materialize_one(def, config, &by_name)?);
        }

        for id in 0..targets.len() {
            let argv = crate::target::argv::synthesize(&targets, TargetId(id));
            targets[id].argv = argv;
        }

        let order = (0..targets.len()).map(TargetId).collect();

        Ok(Self{targets, by_name, order})
    }

    /// Look up a target by the name it was declared under.
    pub fn target_id(&self, name: &str) -> Option<TargetId>
    {
        self.by_name.get(name).copied()
    }

    /// The targets owned by this context, in declaration order.
    pub fn targets(&self) -> &[Target]
    {
        &self.targets
    }

    /// Build every target, in declaration order, aborting on the first
    /// failure.
    pub fn build_all(&mut self, spawn: &impl Spawn) -> Result<(), ExecuteError>
    {
        for id in self.order.clone() {
            execute(&mut self.targets, id, spawn)?;
        }
        Ok(())
    }
}

/// Recursively build `id`'s dependencies, then `id` itself if needed
/// (C6).
///
/// Every dependency of `id` completes, in declaration order, before
/// `id`'s own linter or command starts. The same target may be visited
/// more than once across a pass (diamond dependencies), but its command
/// is spawned at most once: the second visit finds the cache oracle
/// already satisfied.
fn execute(targets: &mut [Target], id: TargetId, spawn: &impl Spawn)
    -> Result<(), ExecuteError>
{
    // Already built earlier in this pass (diamond dependency): nothing
    // left to do. Without this, `needs_execute`'s rule 4.5(a) - rebuild
    // if a dependency executed - would keep firing on every later visit
    // of a link target whose dependency's `executed` flag is still set
    // from the first visit, spawning its command more than once.
    if targets[id.0].executed {
        return Ok(());
    }

    let dependencies = targets[id.0].dependencies.clone();
    for dep in dependencies {
        execute(targets, dep, spawn)?;
    }

    if !cache::needs_execute(targets, id)? {
        log::debug!("{:?} is up to date", targets[id.0].name);
        return Ok(());
    }

    let name = targets[id.0].name.to_string_lossy().into_owned();
    log::info!("building {name}");

    if let Err(err) = spawn.run_linter(&name, &targets[id.0].sources, &targets[id.0].include_flags) {
        log::error!("{name}: linter failed: {err}");
        return Err(err);
    }
    if let Err(err) = spawn.run_command(&name, &targets[id.0].argv) {
        log::error!("{name}: build command failed: {err}");
        return Err(err);
    }

    cache::store(&targets[id.0])?;
    targets[id.0].executed = true;

    Ok(())
}

/// Reject duplicate names, dangling dependency references, and cycles
/// (C7, phase 1).
fn validate(definitions: &[TargetDefinition]) -> Result<(), ValidationError>
{
    let mut by_name: HashMap<&str, usize> = HashMap::with_capacity(definitions.len());
    for (i, def) in definitions.iter().enumerate() {
        if by_name.insert(&def.name, i).is_some() {
            return Err(ValidationError::DuplicateName(def.name.clone()));
        }
    }

    for def in definitions {
        for candidate in [def.name.as_str(), def.source_stem()] {
            if let Err(reason) = Basename::new(candidate) {
                return Err(ValidationError::InvalidName{
                    target: def.name.clone(),
                    name: candidate.to_owned(),
                    reason,
                });
            }
        }
    }

    for def in definitions {
        for dependency in &def.dependencies {
            if !by_name.contains_key(dependency.as_str()) {
                return Err(ValidationError::MissingDependency{
                    target: def.name.clone(),
                    dependency: dependency.clone(),
                });
            }
        }
    }

    detect_cycle(definitions, &by_name)
}

#[derive(Clone, Copy, Eq, PartialEq)]
enum Color { White, Gray, Black }

fn detect_cycle(definitions: &[TargetDefinition], by_name: &HashMap<&str, usize>)
    -> Result<(), ValidationError>
{
    let mut color = vec![Color::White; definitions.len()];
    let mut stack = Vec::new();

    for start in 0..definitions.len() {
        if color[start] == Color::White {
            visit(start, definitions, by_name, &mut color, &mut stack)?;
        }
    }

    Ok(())
}

fn visit(
    i:           usize,
    definitions: &[TargetDefinition],
    by_name:     &HashMap<&str, usize>,
    color:       &mut [Color],
    stack:       &mut Vec<usize>,
) -> Result<(), ValidationError>
{
    color[i] = Color::Gray;
    stack.push(i);

    for dependency in &definitions[i].dependencies {
        // Already validated to exist by `validate`.
        let j = by_name[dependency.as_str()];

        match color[j] {
            Color::White => visit(j, definitions, by_name, color, stack)?,
            Color::Gray => {
                let pos = stack.iter().position(|&k| k == j)
                    .expect("a Gray node must be on the stack");
                let mut path: Vec<String> = stack[pos..].iter()
                    .map(|&k| definitions[k].name.clone())
                    .collect();
                path.push(definitions[j].name.clone());
                log::error!("dependency cycle: {}", path.join(" -> "));
                return Err(ValidationError::CycleDetected(path));
            }
            Color::Black => { }
        }
    }

    stack.pop();
    color[i] = Color::Black;
    Ok(())
}

/// Resolve paths and compute the input digest for a single definition
/// (C7, phase 2).
fn materialize_one(
    def:     &TargetDefinition,
    config:  &BuildConfig,
    by_name: &HashMap<String, TargetId>,
) -> Result<Target, ContextError>
{
    let kind = match def.kind {
        TargetDefinitionKind::Object       => TargetKind::Object,
        TargetDefinitionKind::Executable   => TargetKind::Executable,
        TargetDefinitionKind::SharedObject => TargetKind::SharedObject,
    };

    let name = PathBuf::from(format!(
        "{}/{}{}{}",
        config.paths.out_dir, def.name, config.paths.suffix, kind.extension(),
    ));

    let source = PathBuf::from(format!(
        "{}/{}.c",
        config.paths.src_dir, def.source_stem(),
    ));

    let include_flags = vec![config.flags.include_flags.clone()];
    let input_digest = hash::hash_sources(&[&source], &include_flags)?;

    let dependencies = def.dependencies.iter()
        .map(|dep| by_name[dep])
        .collect();

    let extra_flags = vec![
        config.flags.ll_flags.clone(),
        def.extra_flags.clone().unwrap_or_default(),
    ];

    Ok(Target{
        name,
        kind,
        sources: vec![source],
        cc_flags: vec![config.flags.cc_flags.clone()],
        include_flags,
        extra_flags,
        dependencies,
        argv: Vec::new(),
        input_digest,
        executed: false,
    })
}

#[cfg(test)]
mod tests
{
    use {
        super::*,
        crate::definition::{BuildFlags, BuildPaths},
        std::{cell::RefCell, fs},
    };

    struct FakeSpawn
    {
        ran: RefCell<Vec<String>>,
    }

    impl Spawn for FakeSpawn
    {
        fn run_linter(&self, _: &str, _: &[PathBuf], _: &[String]) -> Result<(), ExecuteError>
        {
            Ok(())
        }

        fn run_command(&self, target_name: &str, _: &[String]) -> Result<(), ExecuteError>
        {
            self.ran.borrow_mut().push(target_name.to_owned());
            Ok(())
        }
    }

    fn config(dir: &std::path::Path) -> BuildConfig
    {
        BuildConfig{
            paths: BuildPaths{
                src_dir: dir.join("src").to_string_lossy().into_owned(),
                out_dir: dir.join("out").to_string_lossy().into_owned(),
                suffix: String::new(),
            },
            flags: BuildFlags::default(),
        }
    }

    fn write_source(dir: &std::path::Path, name: &str, body: &str)
    {
        fs::create_dir_all(dir.join("src")).unwrap();
        fs::create_dir_all(dir.join("out")).unwrap();
        fs::write(dir.join("src").join(format!("{name}.c")), body).unwrap();
    }

    fn tmp(name: &str) -> PathBuf
    {
        let dir = std::env::temp_dir().join(format!("otter-core-build-{name}-{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn duplicate_name_rejected()
    {
        let dir = tmp("dup");
        write_source(&dir, "a", "int a;");
        let defs = vec![TargetDefinition::object("a"), TargetDefinition::object("a")];
        let err = BuildContext::create(&defs, &config(&dir));
        assert!(matches!(err, Err(ContextError::Validation(ValidationError::DuplicateName(_)))));
    }

    #[test]
    fn name_escaping_out_dir_is_rejected()
    {
        let dir = tmp("escape");
        let defs = vec![TargetDefinition::object("../escape")];
        let err = BuildContext::create(&defs, &config(&dir));
        assert!(matches!(err, Err(ContextError::Validation(ValidationError::InvalidName{..}))));
    }

    #[test]
    fn missing_dependency_rejected()
    {
        let dir = tmp("missing-dep");
        let defs = vec![TargetDefinition::executable("main", ["ghost"])];
        let err = BuildContext::create(&defs, &config(&dir));
        assert!(matches!(
            err,
            Err(ContextError::Validation(ValidationError::MissingDependency{..})),
        ));
    }

    #[test]
    fn cycle_rejected_with_full_path()
    {
        let dir = tmp("cycle");
        let mut defs = vec![
            TargetDefinition::object("a").with_source("a"),
            TargetDefinition::object("b").with_source("b"),
        ];
        defs[0].dependencies = vec!["b".to_owned()];
        defs[1].dependencies = vec!["a".to_owned()];

        let err = BuildContext::create(&defs, &config(&dir)).unwrap_err();
        match err {
            ContextError::Validation(ValidationError::CycleDetected(path)) => {
                assert!(path.contains(&"a".to_owned()));
                assert!(path.contains(&"b".to_owned()));
            }
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn rerun_with_unchanged_input_skips_command()
    {
        if std::process::Command::new("cc").arg("--version").output().is_err() {
            eprintln!("skipping: no cc on PATH");
            return;
        }

        let dir = tmp("rerun");
        write_source(&dir, "math", "int add(int a, int b) { return a + b; }\n");
        let defs = vec![TargetDefinition::object("math")];
        let cfg = config(&dir);

        let mut ctx = BuildContext::create(&defs, &cfg).unwrap();
        fs::write(ctx.targets()[0].name.clone(), b"placeholder").unwrap();
        let spawn = FakeSpawn{ran: RefCell::new(Vec::new())};
        ctx.build_all(&spawn).unwrap();
        assert_eq!(spawn.ran.borrow().len(), 1);

        let mut ctx2 = BuildContext::create(&defs, &cfg).unwrap();
        let spawn2 = FakeSpawn{ran: RefCell::new(Vec::new())};
        ctx2.build_all(&spawn2).unwrap();
        assert_eq!(spawn2.ran.borrow().len(), 0);
    }

    #[test]
    fn shared_object_reached_twice_in_a_pass_builds_once()
    {
        if std::process::Command::new("cc").arg("--version").output().is_err() {
            eprintln!("skipping: no cc on PATH");
            return;
        }

        // `main` depends on both `util` and `libfoo`, and `libfoo` itself
        // depends on `util`. `build_all` visits `libfoo` directly (its
        // own entry in declaration order) and again while recursing
        // into `main`'s dependencies; a SharedObject must still be
        // spawned only once per pass.
        let dir = tmp("diamond");
        write_source(&dir, "util", "int util(void) { return 1; }\n");
        write_source(&dir, "libfoo", "int libfoo(void) { return 2; }\n");
        write_source(&dir, "main", "int main(void) { return 0; }\n");

        let defs = vec![
            TargetDefinition::object("util"),
            TargetDefinition::shared_object("libfoo", ["util"]),
            TargetDefinition::executable("main", ["util", "libfoo"]),
        ];

        let mut ctx = BuildContext::create(&defs, &config(&dir)).unwrap();
        let spawn = FakeSpawn{ran: RefCell::new(Vec::new())};
        ctx.build_all(&spawn).unwrap();

        let ran = spawn.ran.borrow();
        assert_eq!(ran.iter().filter(|name| name.contains("libfoo")).count(), 1);
        assert_eq!(ran.iter().filter(|name| name.contains("main")).count(), 1);
        assert_eq!(ran.iter().filter(|name| name.contains("util")).count(), 1);
    }
}
