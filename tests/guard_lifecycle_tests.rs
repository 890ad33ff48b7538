//! Redirect guard lifecycle tests
//!
//! Covers the loading → denied/granted transitions, the one-shot redirect,
//! and teardown while the session is still resolving.

use anyhow::Result;
use dealergate::prelude::*;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;
use tempfile::TempDir;

fn harness() -> (Arc<DeferredIdentity>, Arc<RecordingNavigator>) {
    (
        Arc::new(DeferredIdentity::new()),
        Arc::new(RecordingNavigator::new()),
    )
}

#[tokio::test]
async fn test_super_admin_guard_denies_admin_with_single_redirect() -> Result<()> {
    let (identity, navigator) = harness();
    let handle = RoleGuard::<String>::super_admin().mount(identity.clone(), navigator.clone());

    assert_eq!(handle.state(), AccessState::Loading);
    assert_eq!(handle.render(|| "settings".to_string()), Rendered::Spinner);

    identity.resolve(Principal::platform(Role::Admin));
    let state = tokio::time::timeout(Duration::from_secs(1), handle.settled()).await?;
    assert_eq!(state, AccessState::Denied);

    // Re-renders never re-fire the redirect.
    for _ in 0..10 {
        handle.rerender();
        assert!(handle.render(|| "settings".to_string()).is_nothing());
    }

    assert_eq!(navigator.history(), vec![RedirectTarget::default()]);
    assert_eq!(navigator.last().map(String::from).as_deref(), Some("/dashboard"));
    Ok(())
}

#[tokio::test]
async fn test_guard_grants_sufficient_role() -> Result<()> {
    let (identity, navigator) = harness();
    let handle = RoleGuard::dealer_admin()
        .with_loading("Loading inventory…".to_string())
        .mount(identity.clone(), navigator.clone());

    assert_eq!(
        handle.render(|| "inventory".to_string()),
        Rendered::Content("Loading inventory…".to_string())
    );

    identity.resolve(Principal::dealer(Role::DealerAdmin, "D1"));
    assert_eq!(handle.settled().await, AccessState::Granted);
    assert_eq!(
        handle.render(|| "inventory".to_string()),
        Rendered::Content("inventory".to_string())
    );
    assert_eq!(navigator.count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_custom_redirect_target() -> Result<()> {
    let (identity, navigator) = harness();
    let handle = RoleGuard::<String>::admin()
        .redirect_to("/dealers/D1?tab=claims")?
        .mount(identity.clone(), navigator.clone());

    identity.resolve(Principal::dealer(Role::DealerUser, "D1"));
    assert_eq!(handle.settled().await, AccessState::Denied);
    assert_eq!(
        navigator.last().map(String::from).as_deref(),
        Some("/dealers/D1?tab=claims")
    );
    Ok(())
}

#[tokio::test]
async fn test_no_redirect_before_resolution() {
    let (identity, navigator) = harness();
    let handle = RoleGuard::<String>::admin().mount(identity.clone(), navigator.clone());

    for _ in 0..5 {
        tokio::task::yield_now().await;
        assert_eq!(handle.rerender(), AccessState::Loading);
    }
    assert_eq!(navigator.count(), 0);
    assert_eq!(handle.redirects(), 0);
}

#[tokio::test]
async fn test_unmount_mid_resolution_abandons_redirect() {
    let (identity, navigator) = harness();
    let handle = RoleGuard::<String>::super_admin().mount(identity.clone(), navigator.clone());
    tokio::task::yield_now().await;

    drop(handle);
    identity.resolve(Principal::dealer(Role::Readonly, "D1"));
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(navigator.count(), 0);
}

#[tokio::test]
async fn test_session_that_never_resolves_stays_loading() {
    let identity = Arc::new(StaticIdentity::new(SessionSnapshot::loading()));
    let navigator = Arc::new(RecordingNavigator::new());
    let handle = RoleGuard::<String>::admin().mount(identity, navigator.clone());

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert_eq!(handle.state(), AccessState::Loading);
    assert!(
        tokio::time::timeout(Duration::from_millis(10), handle.settled())
            .await
            .is_err()
    );
    assert_eq!(navigator.count(), 0);
}

#[tokio::test]
async fn test_guards_share_one_session() -> Result<()> {
    let (identity, navigator) = harness();

    let handles: Vec<_> = Role::KNOWN
        .into_iter()
        .map(|role| RoleGuard::<String>::new(role).mount(identity.clone(), navigator.clone()))
        .collect();

    identity.resolve(Principal::dealer(Role::DealerAdmin, "D1"));
    let states = futures::future::join_all(handles.iter().map(|h| h.settled())).await;

    assert_eq!(
        states,
        vec![
            AccessState::Granted,
            AccessState::Granted,
            AccessState::Granted,
            AccessState::Denied,
            AccessState::Denied,
        ]
    );
    assert_eq!(navigator.count(), 2);
    Ok(())
}

#[tokio::test]
async fn test_guard_from_config() -> Result<()> {
    let mut config = GuardConfig::development();
    config.default_redirect = RedirectTarget::parse("/login")?;

    let identity = Arc::new(StaticIdentity::new(SessionSnapshot::anonymous()));
    let navigator = Arc::new(RecordingNavigator::new());
    let handle = RoleGuard::<String>::from_config(Role::Readonly, &config)
        .mount(identity, navigator.clone());

    assert_eq!(handle.state(), AccessState::Denied);
    assert_eq!(navigator.last(), Some(RedirectTarget::parse("/login")?));
    Ok(())
}

#[tokio::test]
async fn test_navigator_rerendering_the_guard_does_not_block() -> Result<()> {
    let (identity, _) = harness();
    let slot: Arc<OnceLock<GuardHandle>> = Arc::new(OnceLock::new());
    let navigations = Arc::new(AtomicUsize::new(0));

    let navigator = {
        let slot = slot.clone();
        let navigations = navigations.clone();
        move |target: &RedirectTarget| {
            assert_eq!(target.as_str(), "/dashboard");
            if let Some(handle) = slot.get() {
                assert!(handle.render(|| "settings".to_string()).is_nothing());
                assert_eq!(handle.rerender(), AccessState::Denied);
                assert_eq!(handle.redirects(), 1);
            }
            navigations.fetch_add(1, Ordering::SeqCst);
        }
    };

    let handle = RoleGuard::<String>::super_admin().mount(identity.clone(), Arc::new(navigator));
    let handle = slot.get_or_init(|| handle);

    identity.resolve(Principal::platform(Role::Admin));
    let state = tokio::time::timeout(Duration::from_secs(2), handle.settled()).await?;
    assert_eq!(state, AccessState::Denied);

    // Let the resolution task finish issuing the redirect.
    tokio::task::yield_now().await;
    assert_eq!(navigations.load(Ordering::SeqCst), 1);
    Ok(())
}

/// Log sink shared between the subscriber and the test body
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn audit_lines(&self, result: &str) -> usize {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains("Access check") && line.contains(result))
            .count()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_audit_records_follow_state_changes() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer({
            let logs = logs.clone();
            move || logs.clone()
        })
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let identity = Arc::new(StaticIdentity::principal(Principal::platform(Role::Admin)));
        let navigator = Arc::new(RecordingNavigator::new());
        let handle = RoleGuard::<String>::super_admin()
            .with_audit_logging(true)
            .mount(identity, navigator.clone());

        for _ in 0..5 {
            assert_eq!(handle.rerender(), AccessState::Denied);
        }
        assert_eq!(navigator.count(), 1);
        assert_eq!(logs.audit_lines("denied"), 1);

        handle.refresh(Some(Principal::platform(Role::SuperAdmin)));
        handle.rerender();
        assert_eq!(logs.audit_lines("granted"), 1);
    });
}

#[tokio::test]
async fn test_guard_from_config_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("guards.json");

    let mut config = GuardConfig::production_template();
    config.default_redirect = RedirectTarget::parse("/dealers")?;
    config.to_file(&path)?;

    let loaded = GuardConfig::from_file(&path)?;
    let navigator = Arc::new(RecordingNavigator::new());
    let identity = Arc::new(StaticIdentity::principal(Principal::dealer(
        Role::DealerUser,
        "D1",
    )));
    let handle = RoleGuard::<String>::from_config(Role::DealerAdmin, &loaded)
        .mount(identity, navigator.clone());

    assert_eq!(handle.state(), AccessState::Denied);
    assert_eq!(navigator.last().map(String::from).as_deref(), Some("/dealers"));
    Ok(())
}
