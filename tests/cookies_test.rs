use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use cookiewatch::base::options::{GetOptions, SetOptions};
use cookiewatch::jar::store::CookieJar;
use time::macros::datetime;
use time::Duration;

const GET: GetOptions = GetOptions { raw: false };

fn counter_listener(jar: &CookieJar) -> Arc<AtomicUsize> {
    let counter = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&counter);
    jar.add_change_listener(move || {
        probe.fetch_add(1, Ordering::SeqCst);
    });
    counter
}

#[test]
fn test_from_header_seeds_the_jar() {
    let jar = CookieJar::from_header(Some("name=value; session=abc123"));
    assert_eq!(jar.len(), 2);
    assert_eq!(jar.get("name", &GET).as_deref(), Some("value"));
    assert_eq!(jar.get("session", &GET).as_deref(), Some("abc123"));
}

#[test]
fn test_from_header_without_header_is_empty() {
    let jar = CookieJar::from_header(None);
    assert!(jar.is_empty());
    assert!(jar.get_all(&GET).is_empty());
}

#[test]
fn test_set_then_get_round_trips() {
    let jar = CookieJar::new();
    jar.set("plain", "value", &SetOptions::default());
    jar.set("spaced", "hello world", &SetOptions::default());
    jar.set("unicode", "你好 😀", &SetOptions::default());

    assert_eq!(jar.get("plain", &GET).as_deref(), Some("value"));
    assert_eq!(jar.get("spaced", &GET).as_deref(), Some("hello world"));
    assert_eq!(jar.get("unicode", &GET).as_deref(), Some("你好 😀"));
}

#[test]
fn test_set_overwrites_existing_entry() {
    let jar = CookieJar::new();
    jar.set("name", "first", &SetOptions::default());
    jar.set("name", "second", &SetOptions::default());
    assert_eq!(jar.get("name", &GET).as_deref(), Some("second"));
    assert_eq!(jar.len(), 1);
}

#[test]
fn test_remove_deletes_entry() {
    let jar = CookieJar::from_header(Some("a=1; b=2"));
    jar.remove("a", &SetOptions::default());
    assert_eq!(jar.get("a", &GET), None);
    assert_eq!(jar.get("b", &GET).as_deref(), Some("2"));
}

#[test]
fn test_expired_entry_is_invisible_to_reads() {
    let jar = CookieJar::new();
    jar.set(
        "stale",
        "gone",
        &SetOptions {
            expires: Some(datetime!(2000-01-01 0:00 UTC)),
            ..Default::default()
        },
    );
    jar.set("live", "here", &SetOptions::default());

    assert_eq!(jar.get("stale", &GET), None);
    let all = jar.get_all(&GET);
    assert!(!all.contains_key("stale"));
    assert_eq!(all["live"], "here");
    // The entry still occupies the store.
    assert_eq!(jar.len(), 2);
}

#[test]
fn test_max_age_controls_visibility() {
    let jar = CookieJar::new();
    jar.set(
        "kept",
        "v",
        &SetOptions {
            max_age: Some(Duration::days(30)),
            ..Default::default()
        },
    );
    jar.set(
        "dropped",
        "v",
        &SetOptions {
            max_age: Some(Duration::days(-1)),
            ..Default::default()
        },
    );

    assert_eq!(jar.get("kept", &GET).as_deref(), Some("v"));
    assert_eq!(jar.get("dropped", &GET), None);
}

#[test]
fn test_clear_empties_the_jar() {
    let jar = CookieJar::from_header(Some("a=1; b=2; c=3"));
    jar.clear();
    assert!(jar.is_empty());
    assert!(jar.get_all(&GET).is_empty());
}

#[test]
fn test_to_header_round_trips() {
    let jar = CookieJar::from_header(Some("a=1; b=hello%20world"));
    let header = jar.to_header().unwrap();

    let reparsed = CookieJar::from_header(Some(&header));
    assert_eq!(reparsed.get_all(&GET), jar.get_all(&GET));
}

#[test]
fn test_to_header_is_none_when_empty() {
    assert_eq!(CookieJar::new().to_header(), None);
}

#[test]
fn test_to_header_skips_expired_entries() {
    let jar = CookieJar::new();
    jar.set(
        "stale",
        "gone",
        &SetOptions {
            expires: Some(datetime!(2000-01-01 0:00 UTC)),
            ..Default::default()
        },
    );
    jar.set("live", "here", &SetOptions::default());

    assert_eq!(jar.to_header().as_deref(), Some("live=here"));
}

#[test]
fn test_every_mutation_notifies_listeners() {
    let jar = CookieJar::new();
    let counter = counter_listener(&jar);

    jar.set("a", "1", &SetOptions::default());
    jar.remove("a", &SetOptions::default());
    jar.clear();

    assert_eq!(counter.load(Ordering::SeqCst), 3);
}

#[test]
fn test_removing_absent_name_still_notifies() {
    let jar = CookieJar::new();
    let counter = counter_listener(&jar);

    jar.remove("never-set", &SetOptions::default());
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn test_deregistered_listener_goes_quiet() {
    let jar = CookieJar::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&counter);
    let id = jar.add_change_listener(move || {
        probe.fetch_add(1, Ordering::SeqCst);
    });

    jar.set("a", "1", &SetOptions::default());
    assert!(jar.remove_change_listener(id));
    jar.set("b", "2", &SetOptions::default());

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    assert!(!jar.remove_change_listener(id));
}

#[test]
fn test_dropping_subscription_deregisters_exactly_once() {
    let jar = CookieJar::new();
    let counter = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&counter);
    let subscription = jar.subscribe(move || {
        probe.fetch_add(1, Ordering::SeqCst);
    });

    jar.set("a", "1", &SetOptions::default());
    let id = subscription.id();
    drop(subscription);
    jar.set("b", "2", &SetOptions::default());

    assert_eq!(counter.load(Ordering::SeqCst), 1);
    // The guard already removed the listener on drop.
    assert!(!jar.remove_change_listener(id));
}

#[test]
fn test_listener_may_read_the_jar() {
    let jar = CookieJar::new();
    let seen = Arc::new(AtomicUsize::new(0));
    let probe = Arc::clone(&seen);
    let handle = jar.clone();
    let _subscription = jar.subscribe(move || {
        probe.store(handle.get_all(&GET).len(), Ordering::SeqCst);
    });

    jar.set("a", "1", &SetOptions::default());
    jar.set("b", "2", &SetOptions::default());

    assert_eq!(seen.load(Ordering::SeqCst), 2);
}

#[test]
fn test_clones_share_one_store() {
    let jar = CookieJar::new();
    let other = jar.clone();

    jar.set("shared", "yes", &SetOptions::default());
    assert_eq!(other.get("shared", &GET).as_deref(), Some("yes"));
    assert_eq!(jar.version(), other.version());
}

#[test]
fn test_version_increases_with_each_mutation() {
    let jar = CookieJar::new();
    let start = jar.version();

    jar.set("a", "1", &SetOptions::default());
    let after_set = jar.version();
    assert!(after_set > start);

    jar.remove("a", &SetOptions::default());
    assert!(jar.version() > after_set);

    // Reads leave the version untouched.
    let settled = jar.version();
    let _ = jar.get_all(&GET);
    assert_eq!(jar.version(), settled);
}

#[test]
fn test_ambient_jar_is_process_wide() {
    let a = CookieJar::ambient();
    let b = CookieJar::ambient();

    a.set("ambient_probe_store", "shared", &SetOptions::default());
    assert_eq!(
        b.get("ambient_probe_store", &GET).as_deref(),
        Some("shared")
    );
    b.remove("ambient_probe_store", &SetOptions::default());
}
