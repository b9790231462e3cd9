//! Property tests for module name resolution.

use std::path::{Path, PathBuf};

use modgraph_kernel::naming::{resolve_import_source, resolve_module_name};
use modgraph_kernel::{DefaultNameResolver, NameContext, Namespaced};
use proptest::prelude::*;

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,7}"
}

fn canonical_name() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|segments| segments.join("/"))
}

const CWD: &str = "/proj";

proptest! {
    #[test]
    fn canonical_names_are_fixed_points(name in canonical_name()) {
        let cwd = Path::new(CWD);
        let once = resolve_module_name(&cwd.join(&name), cwd, ".js");
        prop_assert_eq!(&once, &name);

        let with_ext = resolve_module_name(&cwd.join(format!("{name}.js")), cwd, ".js");
        prop_assert_eq!(&with_ext, &name);
        prop_assert_eq!(resolve_module_name(&cwd.join(&with_ext), cwd, ".js"), with_ext);
    }

    #[test]
    fn sibling_importers_agree(
        dir in canonical_name(),
        a in segment(),
        b in segment(),
        target in segment(),
    ) {
        let ctx = NameContext { cwd: Path::new(CWD), extension: ".js" };
        let base = PathBuf::from(CWD).join(&dir);
        let from = format!("./{target}");

        let via_a = resolve_import_source(&from, &base.join(format!("{a}.js")), &ctx, &DefaultNameResolver);
        let via_b = resolve_import_source(&from, &base.join(format!("{b}.js")), &ctx, &DefaultNameResolver);
        prop_assert_eq!(&via_a, &via_b);
        prop_assert_eq!(via_a, format!("{dir}/{target}"));
    }

    #[test]
    fn bare_sources_pass_through(name in canonical_name(), importer in canonical_name()) {
        let ctx = NameContext { cwd: Path::new(CWD), extension: ".js" };
        let resolver = Namespaced::new("ns/", DefaultNameResolver);
        let file = PathBuf::from(CWD).join(format!("{importer}.js"));
        prop_assert_eq!(resolve_import_source(&name, &file, &ctx, &resolver), name);
    }

    #[test]
    fn parent_then_child_is_identity(dir in canonical_name(), leaf in segment(), file in segment()) {
        let ctx = NameContext { cwd: Path::new(CWD), extension: ".js" };
        let importer = PathBuf::from(CWD).join(&dir).join(&leaf).join(format!("{file}.js"));
        let from = format!("../{leaf}/{file}");
        prop_assert_eq!(
            resolve_import_source(&from, &importer, &ctx, &DefaultNameResolver),
            format!("{dir}/{leaf}/{file}")
        );
    }
}
