//! Integration tests for the shuttle binary

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const TOP_LEVEL_MANIFESTS: [&str; 5] = [
        "build-manifest.json",
        "routes-manifest.json",
        "app-build-manifest.json",
        "react-loadable-manifest.json",
        "app-path-routes-manifest.json",
    ];

    fn shuttle(cwd: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("shuttle");
        cmd.current_dir(cwd)
            .env_remove("SHUTTLE_CONFIG")
            .env_remove("SHUTTLE_TOOL_VERSION");
        cmd
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn dist_fixture(root: &Path) {
        write(
            root,
            "server/pages-manifest.json",
            r#"{"/x":"pages/x.html","/api":"pages/api.js"}"#,
        );
        write(root, "server/pages/x.js", "module.exports = 1");
        write(root, "server/pages/x.html", "<html></html>");
        write(root, "server/app/page.rsc", "0:[]");
        write(root, "static/media/bar.png", "png");
        for name in TOP_LEVEL_MANIFESTS {
            write(root, name, "{}");
        }
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        shuttle(temp.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("incremental builds"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        shuttle(temp.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("shuttle"));
    }

    #[test]
    fn fingerprint_prints_manifest() {
        let temp = TempDir::new().unwrap();
        shuttle(temp.path())
            .args(["fingerprint", "--tool-version", "14.2.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"toolVersion\": \"14.2.0\""))
            .stdout(predicate::str::contains("globalHash"));
    }

    #[test]
    fn fingerprint_is_stable_across_runs() {
        let temp = TempDir::new().unwrap();
        let run = || {
            let out = shuttle(temp.path())
                .args(["fingerprint", "--format", "plain", "-e", "NEXT_PUBLIC_A=1"])
                .output()
                .unwrap();
            assert!(out.status.success());
            String::from_utf8(out.stdout).unwrap()
        };

        let first = run();
        assert_eq!(first.trim().len(), 64);
        assert_eq!(first, run());
    }

    #[test]
    fn fingerprint_follows_config_file() {
        let temp = TempDir::new().unwrap();
        let plain = shuttle(temp.path())
            .args(["fingerprint", "--format", "plain"])
            .output()
            .unwrap();

        write(temp.path(), "shuttle.toml", "[build]\nbasePath = \"/docs\"\n");
        let configured = shuttle(temp.path())
            .args(["fingerprint", "--format", "plain"])
            .output()
            .unwrap();

        assert!(plain.status.success() && configured.status.success());
        assert_ne!(plain.stdout, configured.stdout);
    }

    #[test]
    fn fingerprint_explain_lists_inputs() {
        let temp = TempDir::new().unwrap();
        shuttle(temp.path())
            .args(["fingerprint", "--explain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("basePath=\"\""))
            .stdout(predicate::str::contains("i18n=undefined"));
    }

    #[test]
    fn invalid_tool_version_fails() {
        let temp = TempDir::new().unwrap();
        shuttle(temp.path())
            .args(["fingerprint", "--tool-version", "latest"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid tool version"));
    }

    #[test]
    fn missing_explicit_config_fails() {
        let temp = TempDir::new().unwrap();
        shuttle(temp.path())
            .args(["--config", "nope.toml", "fingerprint"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Configuration file not found"));
    }

    #[test]
    fn store_builds_shuttle() {
        let temp = TempDir::new().unwrap();
        dist_fixture(&temp.path().join(".next"));

        shuttle(temp.path())
            .args(["store", "--tool-version", "14.2.0"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Stored shuttle"));

        let shuttle_dir = temp.path().join(".next/cache/shuttle");
        assert!(shuttle_dir.join("shuttle-manifest.json").is_file());
        assert!(shuttle_dir.join("server/pages/x.js").is_file());
        assert!(!shuttle_dir.join("server/pages/x.html").exists());
        assert!(!shuttle_dir.join("server/app/page.rsc").exists());
        assert!(shuttle_dir.join("static/media/bar.png").is_file());
        for name in TOP_LEVEL_MANIFESTS {
            assert!(shuttle_dir.join("manifests").join(name).is_file());
        }

        let routes: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(shuttle_dir.join("server/pages-manifest.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(
            routes,
            serde_json::json!({"/x": "pages/x.js", "/api": "pages/api.js"})
        );
    }

    #[test]
    fn store_hash_matches_fingerprint() {
        let temp = TempDir::new().unwrap();
        dist_fixture(&temp.path().join("dist"));

        shuttle(temp.path())
            .args(["store", "-d", "dist", "-s", "out", "--tool-version", "14.2.0"])
            .assert()
            .success();
        let stored: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(temp.path().join("out/shuttle-manifest.json")).unwrap(),
        )
        .unwrap();

        let out = shuttle(temp.path())
            .args(["fingerprint", "--format", "plain"])
            .output()
            .unwrap();
        let printed = String::from_utf8(out.stdout).unwrap();

        assert_eq!(stored["globalHash"], printed.trim());
        assert_eq!(stored["toolVersion"], "14.2.0");
    }

    #[test]
    fn store_missing_dist_fails_with_hint() {
        let temp = TempDir::new().unwrap();
        shuttle(temp.path())
            .args(["store", "-d", "missing"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Path not found"))
            .stderr(predicate::str::contains("Hint:"));
    }
}
