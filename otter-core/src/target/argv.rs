//! Command synthesis (C2): turning a [`Target`]'s declared fields into
//! the argument vector `cc` (or the linker driving `cc`) is spawned
//! with.
//!
//! Pure function of the already-materialised target graph; no I/O.

use crate::target::{Target, TargetId, TargetKind};

/// Push `token` onto `argv` unless a byte-identical token is already
/// present.
///
/// O(n) per push - acceptable because `argv` is tens of tokens, never
/// more. Kept as a named helper rather than a `HashSet` alongside
/// `argv` so the only source of truth for "what's already there" is
/// `argv` itself.
fn push_deduped(argv: &mut Vec<String>, token: &str)
{
    if !argv.iter().any(|existing| existing == token) {
        argv.push(token.to_owned());
    }
}

/// Split `flags` on whitespace (space/tab/newline) and push each token,
/// applying [`push_deduped`] to every one. Empty tokens (runs of
/// whitespace collapse, matching `strtok`) never reach `argv`.
fn push_flags(argv: &mut Vec<String>, flags: &[String])
{
    for bucket in flags {
        for token in bucket.split_whitespace() {
            push_deduped(argv, token);
        }
    }
}

fn push_path(argv: &mut Vec<String>, path: &std::path::Path)
{
    push_deduped(argv, &path.to_string_lossy());
}

/// Depth-first walk of `id`'s dependency list, collecting the output
/// name of every reachable `Object` target.
///
/// A dependency whose kind is `Object` contributes its name directly;
/// any other kind is not itself a link input, so only *its* own
/// dependencies are recursed into. Order is first-seen; duplicates are
/// suppressed the same way every other `argv` token is.
fn gather_objects(targets: &[Target], id: TargetId, argv: &mut Vec<String>)
{
    for &dep in &targets[id.0].dependencies {
        let dep_target = &targets[dep.0];
        if dep_target.kind == TargetKind::Object {
            push_path(argv, &dep_target.name);
        } else {
            gather_objects(targets, dep, argv);
        }
    }
}

/// Synthesise the `argv` of `targets[id]`.
///
/// Called once, by [`BuildContext::create`][crate::build::BuildContext::create],
/// after every target in the graph exists (transitive object gathering
/// needs to look at dependencies' own kinds and dependency lists).
pub fn synthesize(targets: &[Target], id: TargetId) -> Vec<String>
{
    let target = &targets[id.0];
    let mut argv = Vec::new();

    argv.push("cc".to_owned());

    match target.kind {
        TargetKind::Object => {
            argv.push("-fPIC".to_owned());
            argv.push("-c".to_owned());
            for source in &target.sources {
                push_path(&mut argv, source);
            }
            argv.push("-o".to_owned());
            push_path(&mut argv, &target.name);
            push_flags(&mut argv, &target.include_flags);
            push_flags(&mut argv, &target.cc_flags);
        }
        TargetKind::Executable | TargetKind::SharedObject => {
            if target.kind == TargetKind::SharedObject {
                push_deduped(&mut argv, "-shared");
                push_deduped(&mut argv, "-fPIC");
            }
            argv.push("-o".to_owned());
            push_path(&mut argv, &target.name);
            for source in &target.sources {
                push_path(&mut argv, source);
            }
            gather_objects(targets, id, &mut argv);
            push_flags(&mut argv, &target.include_flags);
            push_flags(&mut argv, &target.cc_flags);
            push_flags(&mut argv, &target.extra_flags);
        }
    }

    argv
}

#[cfg(test)]
mod tests
{
    use super::*;
    use std::path::PathBuf;

    fn object(name: &str, deps: Vec<TargetId>) -> Target
    {
        Target{
            name: PathBuf::from(format!("/t/out/{name}.o")),
            kind: TargetKind::Object,
            sources: vec![PathBuf::from(format!("/t/src/{name}.c"))],
            cc_flags: vec!["-Wall".to_owned()],
            include_flags: vec![],
            extra_flags: vec![],
            dependencies: deps,
            argv: vec![],
            input_digest: otter_util::hash::Hash([0; 20]),
            executed: false,
        }
    }

    fn executable(name: &str, deps: Vec<TargetId>) -> Target
    {
        Target{
            name: PathBuf::from(format!("/t/out/{name}")),
            kind: TargetKind::Executable,
            sources: vec![PathBuf::from(format!("/t/src/{name}.c"))],
            cc_flags: vec!["-Wall".to_owned()],
            include_flags: vec![],
            extra_flags: vec![],
            dependencies: deps,
            argv: vec![],
            input_digest: otter_util::hash::Hash([0; 20]),
            executed: false,
        }
    }

    #[test]
    fn object_argv_matches_spec_shape()
    {
        let targets = vec![object("math", vec![])];
        let argv = synthesize(&targets, TargetId(0));
        assert_eq!(argv, vec![
            "cc", "-fPIC", "-c", "/t/src/math.c", "-o", "/t/out/math.o", "-Wall",
        ]);
    }

    #[test]
    fn executable_collects_transitive_objects_once()
    {
        // main -> util (Object), main -> glue (Executable-ish passthrough) -> util again
        let util = object("util", vec![]);
        let glue_id = TargetId(1);
        let mut targets = vec![util, object("glue", vec![])];
        // make "glue" a non-Object link-only passthrough whose own deps reach util
        targets[1].kind = TargetKind::Executable;
        targets[1].dependencies = vec![TargetId(0)];
        let _ = glue_id;

        targets.push(executable("main", vec![TargetId(0), TargetId(1)]));
        let main_id = TargetId(2);

        let argv = synthesize(&targets, main_id);
        let util_occurrences = argv.iter().filter(|t| *t == "/t/out/util.o").count();
        assert_eq!(util_occurrences, 1);
    }

    #[test]
    fn shared_object_is_prefixed()
    {
        let mut targets = vec![executable("lib", vec![])];
        targets[0].kind = TargetKind::SharedObject;
        let argv = synthesize(&targets, TargetId(0));
        assert_eq!(&argv[..3], &["cc", "-shared", "-fPIC"]);
    }

    #[test]
    fn dedup_drops_repeated_flag_tokens()
    {
        let mut t = object("math", vec![]);
        t.cc_flags = vec!["-Wall -Wall -Iinc".to_owned(), "-Wall".to_owned()];
        let targets = vec![t];
        let argv = synthesize(&targets, TargetId(0));
        assert_eq!(argv.iter().filter(|t| *t == "-Wall").count(), 1);
    }
}
