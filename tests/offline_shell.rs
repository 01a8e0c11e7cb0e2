use std::collections::HashMap;

use linekeys::worker::{
    AssetRequest, AssetResponse, AssetStore, CacheWorker, DirStore, FetchDecision, FetchError,
    NetworkFetch, WorkerConfig, WorkerState,
};

const ORIGIN: &str = "https://app.test";

/// Routes URLs to canned responses; `offline` makes every fetch fail.
#[derive(Default)]
struct ScriptedNet {
    routes: HashMap<String, AssetResponse>,
    offline: bool,
}

impl ScriptedNet {
    fn shell() -> Self {
        let mut net = Self::default();
        for path in ["/", "/index.html", "/manifest.json", "/favicon.svg"] {
            net.routes.insert(
                format!("{ORIGIN}{path}"),
                AssetResponse::ok(format!("asset:{path}")),
            );
        }
        net
    }

    fn offline() -> Self {
        Self {
            routes: HashMap::new(),
            offline: true,
        }
    }
}

impl NetworkFetch for ScriptedNet {
    fn fetch(&mut self, request: &AssetRequest) -> Result<AssetResponse, FetchError> {
        if self.offline {
            return Err(FetchError::new("offline"));
        }
        self.routes
            .get(&request.url)
            .cloned()
            .ok_or_else(|| FetchError::new("unreachable host"))
    }
}

#[test]
fn test_offline_reload_serves_cached_shell_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    // First session: online install and activation.
    {
        let store = DirStore::open(dir.path()).unwrap();
        let mut worker =
            CacheWorker::new(WorkerConfig::shell(ORIGIN), store, ScriptedNet::shell());
        worker.handle_install().unwrap();
        worker.handle_activate().unwrap();
        assert_eq!(worker.state(), WorkerState::Active);
    }

    // Second session: the activated worker resumes with no network at all.
    let store = DirStore::open(dir.path()).unwrap();
    let mut worker =
        CacheWorker::resume_active(WorkerConfig::shell(ORIGIN), store, ScriptedNet::offline());

    for path in ["/", "/index.html", "/manifest.json", "/favicon.svg"] {
        let request = AssetRequest::get(format!("{ORIGIN}{path}"));
        let decision = worker.handle_fetch(&request);
        assert_eq!(
            decision,
            FetchDecision::Respond(AssetResponse::ok(format!("asset:{path}"))),
            "manifest path {path} should be served from the persisted cache"
        );
    }

    // Offline navigation to an uncached page falls back to the shell document.
    let navigation = AssetRequest::navigation(format!("{ORIGIN}/deep/link"));
    assert_eq!(
        worker.handle_fetch(&navigation),
        FetchDecision::Respond(AssetResponse::ok("asset:/index.html"))
    );

    // Offline subresource never seen before degrades to the synthetic 503.
    let miss = AssetRequest::get(format!("{ORIGIN}/never-fetched.js"));
    assert_eq!(
        worker.handle_fetch(&miss),
        FetchDecision::Respond(AssetResponse::service_unavailable())
    );
}

#[test]
fn test_new_version_activation_purges_previous_generation_on_disk() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = DirStore::open(dir.path()).unwrap();
        let mut worker =
            CacheWorker::new(WorkerConfig::shell(ORIGIN), store, ScriptedNet::shell());
        worker.handle_install().unwrap();
        worker.handle_activate().unwrap();
    }

    // A new version with a bumped cache name takes over.
    let mut config = WorkerConfig::shell(ORIGIN);
    config.cache_name = "linekeys-shell-v2".to_string();
    let store = DirStore::open(dir.path()).unwrap();
    let mut worker = CacheWorker::new(config, store, ScriptedNet::shell());
    worker.handle_install().unwrap();
    worker.handle_activate().unwrap();

    let store = DirStore::open(dir.path()).unwrap();
    assert_eq!(
        store.generations().unwrap(),
        vec!["linekeys-shell-v2".to_string()],
        "activation must leave exactly the new generation behind"
    );
}

#[test]
fn test_failed_install_leaves_old_version_in_control() {
    let dir = tempfile::tempdir().unwrap();

    {
        let store = DirStore::open(dir.path()).unwrap();
        let mut worker =
            CacheWorker::new(WorkerConfig::shell(ORIGIN), store, ScriptedNet::shell());
        worker.handle_install().unwrap();
        worker.handle_activate().unwrap();
    }

    // The v2 install dies on an unreachable manifest asset; v1's generation
    // must survive untouched.
    let mut config = WorkerConfig::shell(ORIGIN);
    config.cache_name = "linekeys-shell-v2".to_string();
    let store = DirStore::open(dir.path()).unwrap();
    let mut worker = CacheWorker::new(config, store, ScriptedNet::offline());
    assert!(worker.handle_install().is_err());
    assert_eq!(worker.state(), WorkerState::Installing);

    let store = DirStore::open(dir.path()).unwrap();
    let mut old =
        CacheWorker::resume_active(WorkerConfig::shell(ORIGIN), store, ScriptedNet::offline());
    let request = AssetRequest::get(format!("{ORIGIN}/index.html"));
    assert_eq!(
        old.handle_fetch(&request),
        FetchDecision::Respond(AssetResponse::ok("asset:/index.html"))
    );
}
