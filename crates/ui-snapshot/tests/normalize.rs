//! End-to-end normalization of raw hierarchy dumps.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ui_snapshot::{
    format_xml_input, Document, Locator, RawSnapshotSource, SnapshotError, SnapshotResult,
    StaticSource, XmlHierarchy, DEFAULT_VIEW_NAME, INSTANCE_ATTRIBUTE,
};

const SETTINGS_DUMP: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?>
<hierarchy index="0" class="" rotation="0" width="1080" height="2220">
  <node index="0" text="" class="android.widget.FrameLayout" package="com.android.settings" bounds="[0,0][1080,2220]">
    <node index="0" text="" class="android.widget.LinearLayout" package="com.android.settings" bounds="[0,0][1080,2220]">
      <node index="0" text="Settings" class="android.widget.TextView" package="com.android.settings" bounds="[42,84][300,150]" />
      <node index="1" text="" class="com.android.settings.widget$SearchBar" package="com.android.settings" bounds="[0,160][1080,260]">
        <node index="0" text="Search settings" class="android.widget.TextView" package="com.android.settings" bounds="[120,180][900,240]" />
      </node>
      <node index="2" text="" class="androidx.recyclerview.widget.RecyclerView" package="com.android.settings" bounds="[0,260][1080,2220]">
        <node index="0" text="Network &amp; internet" class="android.widget.TextView" package="com.android.settings" bounds="[0,260][1080,400]" />
        <node index="1" text="Connected devices" class="android.widget.TextView" package="com.android.settings" bounds="[0,400][1080,540]" />
        <node index="2" text="" class="   " package="com.android.settings" bounds="[0,540][1080,680]" />
      </node>
    </node>
  </node>
</hierarchy>"#;

struct CountingSource {
    xml: String,
    refreshes: AtomicUsize,
}

impl RawSnapshotSource for CountingSource {
    fn refresh_active_root(&self) -> SnapshotResult<()> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn window_hierarchy(&self) -> SnapshotResult<String> {
        Ok(self.xml.clone())
    }
}

struct UnavailableSource;

impl RawSnapshotSource for UnavailableSource {
    fn refresh_active_root(&self) -> SnapshotResult<()> {
        Err(SnapshotError::unavailable("no active window"))
    }

    fn window_hierarchy(&self) -> SnapshotResult<String> {
        unreachable!("dump requested without an active root")
    }
}

fn assignments(document: &Document) -> Vec<(String, Option<usize>)> {
    document
        .nodes()
        .map(|node| (node.tag().to_string(), node.instance()))
        .collect()
}

#[test]
fn same_dump_yields_identical_assignments() {
    let first = format_xml_input(SETTINGS_DUMP).expect("first");
    let second = format_xml_input(SETTINGS_DUMP).expect("second");
    assert_eq!(assignments(&first), assignments(&second));
    assert_eq!(
        first.to_xml_string().expect("xml"),
        second.to_xml_string().expect("xml")
    );
}

#[test]
fn instances_are_unique_and_contiguous_per_tag() {
    let document = format_xml_input(SETTINGS_DUMP).expect("normalize");
    let mut per_tag: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for node in document.nodes() {
        if let Some(instance) = node.instance() {
            per_tag.entry(node.tag().to_string()).or_default().push(instance);
        }
    }
    for (tag, instances) in per_tag {
        let unique: BTreeSet<usize> = instances.iter().copied().collect();
        assert_eq!(unique.len(), instances.len(), "duplicate instance for {tag}");
        assert_eq!(instances, (0..instances.len()).collect::<Vec<_>>(), "{tag}");
    }
}

#[test]
fn text_views_are_numbered_in_document_order() {
    let document = format_xml_input(SETTINGS_DUMP).expect("normalize");
    let texts: Vec<(Option<&str>, Option<usize>)> = document
        .find_all("android.widget.TextView")
        .map(|node| (node.attribute("text"), node.instance()))
        .collect();
    assert_eq!(
        texts,
        vec![
            (Some("Settings"), Some(0)),
            (Some("Search settings"), Some(1)),
            (Some("Network & internet"), Some(2)),
            (Some("Connected devices"), Some(3)),
        ]
    );
}

#[test]
fn nested_class_names_are_rewritten() {
    let document = format_xml_input(SETTINGS_DUMP).expect("normalize");
    let search = document
        .find(&Locator::new("com.android.settings.widget.SearchBar", 0))
        .expect("search bar");
    assert_eq!(
        search.attribute("class"),
        Some("com.android.settings.widget$SearchBar")
    );
}

#[test]
fn blank_classes_become_default_views() {
    let document = format_xml_input(SETTINGS_DUMP).expect("normalize");
    // the hierarchy root carries class="" and is visited first
    assert_eq!(document.root().tag(), DEFAULT_VIEW_NAME);
    assert_eq!(document.root().instance(), Some(0));
    let blank = document
        .find(&Locator::new(DEFAULT_VIEW_NAME, 1))
        .expect("blank class node");
    assert_eq!(blank.attribute("bounds"), Some("[0,540][1080,680]"));
}

#[test]
fn classless_root_keeps_its_tag() {
    let document = format_xml_input(
        r#"<hierarchy rotation="0"><node class="android.widget.Button"/></hierarchy>"#,
    )
    .expect("normalize");
    assert_eq!(document.root().tag(), "hierarchy");
    assert!(document.root().attribute(INSTANCE_ATTRIBUTE).is_none());
    assert_eq!(document.root().children()[0].tag(), "android.widget.Button");
}

#[test]
fn normalized_output_reparses_with_canonical_tags() {
    let document = format_xml_input(SETTINGS_DUMP).expect("normalize");
    let xml = document.to_xml_string().expect("xml");
    assert!(xml.contains("<com.android.settings.widget.SearchBar "));
    assert!(!xml.contains("<node "));
    let reparsed = ui_snapshot::parser::parse_hierarchy(&xml).expect("reparse");
    assert_eq!(assignments(&reparsed), assignments(&document));
}

#[test]
fn classes_that_are_not_xml_names_fail_serialization() {
    for class in ["a&lt;b", "1stWidget", "Foo(Bar)", "com.foo:Bar/Baz"] {
        let raw = format!(r#"<hierarchy rotation="0"><node class="{class}"/></hierarchy>"#);
        let document = format_xml_input(&raw).expect("normalize");
        let err = document.to_xml_string().unwrap_err();
        assert!(matches!(err, SnapshotError::Serialization(_)), "{class}");
    }
}

#[test]
fn facade_refreshes_before_every_dump() {
    let source = Arc::new(CountingSource {
        xml: SETTINGS_DUMP.to_string(),
        refreshes: AtomicUsize::new(0),
    });
    let hierarchy = XmlHierarchy::new(source.clone());
    let first = hierarchy.normalized_snapshot().expect("first");
    let second = hierarchy.normalized_snapshot().expect("second");
    assert_eq!(source.refreshes.load(Ordering::SeqCst), 2);
    assert_eq!(first, second);
}

#[test]
fn unavailable_root_is_reported() {
    let hierarchy = XmlHierarchy::new(Arc::new(UnavailableSource));
    let err = hierarchy.normalized_snapshot().unwrap_err();
    assert!(matches!(err, SnapshotError::SnapshotUnavailable(_)));
}

#[test]
fn malformed_dump_is_reported_with_detail() {
    let hierarchy = XmlHierarchy::new(Arc::new(StaticSource::new("<hierarchy><node>")));
    match hierarchy.normalized_snapshot() {
        Err(SnapshotError::MalformedSnapshot { detail }) => assert!(detail.contains("unclosed")),
        other => panic!("expected malformed snapshot, got {other:?}"),
    }
}

#[test]
fn locator_serializes_for_clients() {
    let locator = Locator::new("android.widget.TextView", 3);
    let json = serde_json::to_value(&locator).expect("json");
    assert_eq!(json["tag"], "android.widget.TextView");
    assert_eq!(json["instance"], 3);
}
