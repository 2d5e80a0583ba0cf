//! End-to-end adapter tests over the SurrealDB inventory backend running
//! on the in-memory engine.

use infragate_adapter::dispatch::{ApiKind, Request, Response, WireResource};
use infragate_adapter::wire::{
    Host, HostRegister, Instance, ListParams, MetadataItem, OperatingSystem, Provider, Region,
    SingleSchedule, Site, TelemetryLogsGroup, TelemetryLogsProfile, TelemetryMetricsGroup,
    TelemetryMetricsProfile, Workload, WorkloadMember,
};
use infragate_adapter::{AdapterConfig, InventoryAdapter, RequestContext};
use infragate_core::error::InfraError;
use infragate_inventory::SurrealInventory;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

type Adapter = InventoryAdapter<SurrealInventory<Db>>;

async fn setup() -> (Adapter, RequestContext) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    infragate_inventory::run_migrations(&db).await.unwrap();
    let adapter = InventoryAdapter::new(SurrealInventory::new(db), AdapterConfig::default());
    (adapter, RequestContext::new(Uuid::new_v4()))
}

async fn region(
    adapter: &Adapter,
    ctx: &RequestContext,
    name: &str,
    metadata: &[(&str, &str)],
) -> String {
    let created = adapter
        .create(
            ctx,
            Region {
                name: Some(name.into()),
                metadata: Some(metadata.iter().map(|(k, v)| MetadataItem::new(*k, *v)).collect()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    created.resource_id.unwrap()
}

async fn site(adapter: &Adapter, ctx: &RequestContext, name: &str, region_id: &str) -> String {
    let created = adapter
        .create(
            ctx,
            Site {
                name: Some(name.into()),
                region_id: Some(region_id.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    created.resource_id.unwrap()
}

fn page(page_size: Option<i32>) -> ListParams {
    ListParams {
        page_size,
        ..Default::default()
    }
}

#[tokio::test]
async fn host_read_expands_relations_and_inherited_metadata() {
    let (adapter, ctx) = setup().await;
    let region_id = region(&adapter, &ctx, "emea", &[("country", "de"), ("tier", "gold")]).await;
    let site_id = site(&adapter, &ctx, "store-1", &region_id).await;

    let created = adapter
        .create(
            &ctx,
            Host {
                name: Some("edge-01".into()),
                site_id: Some(site_id.clone()),
                metadata: Some(vec![MetadataItem::new("tier", "silver")]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let host_id = created.resource_id.clone().unwrap();
    assert!(host_id.starts_with("host-"));
    assert!(created.timestamps.unwrap().created_at.is_some());

    let host: Host = adapter.get(&ctx, &host_id).await.unwrap();
    assert_eq!(host.site_id.as_deref(), Some(site_id.as_str()));
    let nested_site = host.site.unwrap();
    assert_eq!(nested_site.name.as_deref(), Some("store-1"));
    assert_eq!(nested_site.region_id.as_deref(), Some(region_id.as_str()));
    assert_eq!(host.metadata, Some(vec![MetadataItem::new("tier", "silver")]));
    assert_eq!(
        host.inherited_metadata,
        Some(vec![
            MetadataItem::new("country", "de"),
            MetadataItem::new("tier", "gold"),
        ])
    );
}

#[tokio::test]
async fn list_pages_and_defaults() {
    let (adapter, ctx) = setup().await;
    for i in 0..10 {
        region(&adapter, &ctx, &format!("region-{i:02}"), &[]).await;
    }

    let first = adapter.list::<Region>(&ctx, &page(Some(4))).await.unwrap();
    assert_eq!(first.items.len(), 4);
    assert_eq!(first.total_elements, 10);
    assert!(first.has_next);

    let all = adapter.list::<Region>(&ctx, &page(None)).await.unwrap();
    assert_eq!(all.items.len(), 10);
    assert!(!all.has_next);

    let ordered = adapter
        .list::<Region>(
            &ctx,
            &ListParams {
                order_by: Some("name desc".into()),
                filter: Some(r#"name = "region-0*""#.into()),
                page_size: Some(3),
                offset: Some(1),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let names: Vec<_> = ordered.items.iter().map(|r| r.name.clone().unwrap()).collect();
    assert_eq!(names, ["region-08", "region-07", "region-06"]);

    let oversized = adapter.list::<Region>(&ctx, &page(Some(101))).await.unwrap_err();
    assert!(oversized.is_validation());
    let negative = adapter
        .list::<Region>(
            &ctx,
            &ListParams {
                offset: Some(-1),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(negative.is_validation());
}

#[tokio::test]
async fn update_replaces_every_masked_field() {
    let (adapter, ctx) = setup().await;
    let region_id = region(&adapter, &ctx, "emea", &[]).await;
    let site_id = site(&adapter, &ctx, "store-1", &region_id).await;
    let host_id = adapter
        .create(
            &ctx,
            Host {
                name: Some("edge-01".into()),
                note: Some("rack 4".into()),
                site_id: Some(site_id),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();

    // Only the name is sent; note and site are reset because they are masked.
    let updated = adapter
        .update(
            &ctx,
            &host_id,
            Host {
                name: Some("edge-02".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name.as_deref(), Some("edge-02"));
    assert_eq!(updated.note.as_deref(), Some(""));
    assert_eq!(updated.site_id, None);

    let fetched: Host = adapter.get(&ctx, &host_id).await.unwrap();
    assert_eq!(fetched.name.as_deref(), Some("edge-02"));
    assert_eq!(fetched.site_id, None);
}

#[tokio::test]
async fn patch_with_cleared_relation_detaches_it() {
    let (adapter, ctx) = setup().await;
    let parent = region(&adapter, &ctx, "emea", &[]).await;
    let child = adapter
        .create(
            &ctx,
            Region {
                name: Some("de".into()),
                parent_id: Some(parent.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(child.parent_id.as_deref(), Some(parent.as_str()));
    let child_id = child.resource_id.unwrap();

    let patched = adapter
        .patch(
            &ctx,
            &child_id,
            Region {
                name: Some("de".into()),
                parent_id: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.parent_id, None);
}

#[tokio::test]
async fn conflicting_schedule_targets_are_rejected_before_the_backend() {
    let (adapter, ctx) = setup().await;
    let region_id = region(&adapter, &ctx, "emea", &[]).await;
    let site_id = site(&adapter, &ctx, "store-1", &region_id).await;

    let err = adapter
        .create(
            &ctx,
            SingleSchedule {
                name: Some("window".into()),
                start_seconds: Some(1_700_000_000),
                target_site_id: Some(site_id.clone()),
                target_region_id: Some(region_id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("only one of targetHostId, targetSiteId, targetRegionId"));

    let listed = adapter.list::<SingleSchedule>(&ctx, &page(None)).await.unwrap();
    assert!(listed.items.is_empty());

    let created = adapter
        .create(
            &ctx,
            SingleSchedule {
                name: Some("window".into()),
                start_seconds: Some(1_700_000_000),
                end_seconds: Some(1_700_003_600),
                target_site_id: Some(site_id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(created.target_site_id.as_deref(), Some(site_id.as_str()));
    assert_eq!(created.target_region_id, None);
}

#[tokio::test]
async fn schedules_filter_by_target_and_epoch() {
    let (adapter, ctx) = setup().await;
    let region_id = region(&adapter, &ctx, "emea", &[]).await;
    for (name, start, end, target) in [
        ("past", 100, 200, Some(region_id.clone())),
        ("open", 150, 0, Some(region_id.clone())),
        ("untargeted", 100, 400, None),
    ] {
        adapter
            .create(
                &ctx,
                SingleSchedule {
                    name: Some(name.into()),
                    start_seconds: Some(start),
                    end_seconds: Some(end),
                    target_region_id: target,
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let names = |items: Vec<SingleSchedule>| -> Vec<String> {
        let mut names: Vec<String> = items.into_iter().filter_map(|s| s.name).collect();
        names.sort();
        names
    };

    let active = adapter
        .list::<SingleSchedule>(
            &ctx,
            &ListParams {
                region_id: Some(region_id.clone()),
                unix_epoch: Some("300".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(names(active.items), ["open"]);

    let detached = adapter
        .list::<SingleSchedule>(
            &ctx,
            &ListParams {
                region_id: Some("null".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(names(detached.items), ["untargeted"]);

    let bad_epoch = adapter
        .list::<SingleSchedule>(
            &ctx,
            &ListParams {
                unix_epoch: Some("yesterday".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(bad_epoch.is_validation());
}

#[tokio::test]
async fn malformed_ids_are_validation_errors() {
    let (adapter, ctx) = setup().await;
    let err = adapter.get::<Host>(&ctx, " ").await.unwrap_err();
    assert!(err.is_validation());
    let err = adapter.get::<Host>(&ctx, "site-0000abcd").await.unwrap_err();
    assert!(err.is_validation());

    let err = adapter
        .create(
            &ctx,
            Host {
                name: Some("edge".into()),
                site_id: Some(" ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let missing = adapter.get::<Host>(&ctx, "host-0000abcd").await.unwrap_err();
    assert!(missing.is_not_found());
}

#[tokio::test]
async fn kinds_without_a_mask_cannot_be_updated() {
    let (adapter, ctx) = setup().await;
    let provider = adapter
        .create(
            &ctx,
            Provider {
                name: Some("lxca".into()),
                api_endpoint: Some("https://lxca.example".into()),
                provider_kind: Some("PROVIDER_KIND_BAREMETAL".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let err = adapter
        .update(&ctx, provider.resource_id.as_deref().unwrap(), provider.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, InfraError::Unimplemented(_)));
}

#[tokio::test]
async fn instance_create_requires_host_and_os() {
    let (adapter, ctx) = setup().await;
    let err = adapter
        .create(
            &ctx,
            Instance {
                name: Some("vm".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let host_id = adapter
        .create(
            &ctx,
            Host {
                name: Some("edge".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();
    let os_id = adapter
        .create(
            &ctx,
            OperatingSystem {
                name: Some("edge-os".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();
    let instance = adapter
        .create(
            &ctx,
            Instance {
                name: Some("vm".into()),
                host_id: Some(host_id.clone()),
                os_id: Some(os_id.clone()),
                desired_state: Some("INSTANCE_STATE_RUNNING".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(instance.os_id.as_deref(), Some(os_id.as_str()));
    assert_eq!(instance.desired_os.unwrap().name.as_deref(), Some("edge-os"));

    // The host now reports its instance.
    let host: Host = adapter.get(&ctx, &host_id).await.unwrap();
    assert_eq!(host.instance.unwrap().resource_id, instance.resource_id);

    let by_host = adapter
        .list::<Instance>(
            &ctx,
            &ListParams {
                host_id: Some(host_id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_host.items.len(), 1);
}

#[tokio::test]
async fn workload_members_are_listed_by_workload() {
    let (adapter, ctx) = setup().await;
    let host_id = adapter
        .create(
            &ctx,
            Host {
                name: Some("edge".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();
    let os_id = adapter
        .create(
            &ctx,
            OperatingSystem {
                name: Some("os".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();
    let instance_id = adapter
        .create(
            &ctx,
            Instance {
                host_id: Some(host_id),
                os_id: Some(os_id),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();
    let workload_id = adapter
        .create(
            &ctx,
            Workload {
                name: Some("cluster-a".into()),
                kind: Some("WORKLOAD_KIND_CLUSTER".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();
    adapter
        .create(
            &ctx,
            WorkloadMember {
                kind: Some("WORKLOAD_MEMBER_KIND_CLUSTER_NODE".into()),
                workload_id: Some(workload_id.clone()),
                instance_id: Some(instance_id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let members = adapter
        .list::<WorkloadMember>(
            &ctx,
            &ListParams {
                workload_id: Some(workload_id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(members.items.len(), 1);
    assert_eq!(members.items[0].instance_id.as_deref(), Some(instance_id.as_str()));

    let workload: Workload = adapter.get(&ctx, &workload_id).await.unwrap();
    assert_eq!(workload.members.unwrap().len(), 1);
}

#[tokio::test]
async fn telemetry_groups_are_kept_apart_by_kind() {
    let (adapter, ctx) = setup().await;
    let logs = adapter
        .create(
            &ctx,
            TelemetryLogsGroup {
                name: Some("syslog".into()),
                collector_kind: Some("COLLECTOR_KIND_HOST".into()),
                groups: Some(vec!["kern".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let metrics = adapter
        .create(
            &ctx,
            TelemetryMetricsGroup {
                name: Some("cpu".into()),
                collector_kind: Some("COLLECTOR_KIND_HOST".into()),
                groups: Some(vec!["cpu".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let listed = adapter.list::<TelemetryLogsGroup>(&ctx, &page(None)).await.unwrap();
    assert_eq!(listed.items.len(), 1);
    assert_eq!(listed.items[0].resource_id, logs.resource_id);

    let err = adapter
        .get::<TelemetryLogsGroup>(&ctx, metrics.resource_id.as_deref().unwrap())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn profiles_only_accept_groups_of_their_own_kind() {
    let (adapter, ctx) = setup().await;
    let region_id = region(&adapter, &ctx, "emea", &[]).await;
    let logs_group = adapter
        .create(
            &ctx,
            TelemetryLogsGroup {
                name: Some("syslog".into()),
                groups: Some(vec!["kern".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();
    let metrics_group = adapter
        .create(
            &ctx,
            TelemetryMetricsGroup {
                name: Some("cpu".into()),
                groups: Some(vec!["cpu".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();

    let err = adapter
        .create(
            &ctx,
            TelemetryLogsProfile {
                target_region: Some(region_id.clone()),
                logs_group_id: Some(metrics_group.clone()),
                log_level: Some("SEVERITY_LEVEL_WARN".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err}");
    let listed = adapter.list::<TelemetryLogsProfile>(&ctx, &page(None)).await.unwrap();
    assert!(listed.items.is_empty());

    let profile_id = adapter
        .create(
            &ctx,
            TelemetryMetricsProfile {
                target_region: Some(region_id.clone()),
                metrics_group_id: Some(metrics_group.clone()),
                metrics_interval: Some(30),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();

    // A logs payload sent to a metrics profile id is refused before writing.
    let err = adapter
        .update(
            &ctx,
            &profile_id,
            TelemetryLogsProfile {
                target_region: Some(region_id.clone()),
                logs_group_id: Some(logs_group.clone()),
                log_level: Some("SEVERITY_LEVEL_WARN".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err}");

    let err = adapter
        .update(
            &ctx,
            &profile_id,
            TelemetryMetricsProfile {
                target_region: Some(region_id),
                metrics_group_id: Some(logs_group),
                metrics_interval: Some(60),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation(), "{err}");

    let stored: TelemetryMetricsProfile = adapter.get(&ctx, &profile_id).await.unwrap();
    assert_eq!(stored.metrics_group_id.as_deref(), Some(metrics_group.as_str()));
    assert_eq!(stored.metrics_interval, Some(30));
}

#[tokio::test]
async fn inherited_profiles_follow_the_location_chain() {
    let (adapter, ctx) = setup().await;
    let region_id = region(&adapter, &ctx, "emea", &[]).await;
    let site_id = site(&adapter, &ctx, "store-1", &region_id).await;
    let other_region = region(&adapter, &ctx, "apac", &[]).await;
    let group_id = adapter
        .create(
            &ctx,
            TelemetryLogsGroup {
                name: Some("syslog".into()),
                groups: Some(vec!["kern".into()]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .resource_id
        .unwrap();
    for target in [&region_id, &other_region] {
        adapter
            .create(
                &ctx,
                TelemetryLogsProfile {
                    target_region: Some(target.clone()),
                    logs_group_id: Some(group_id.clone()),
                    log_level: Some("SEVERITY_LEVEL_WARN".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
    }

    let direct = adapter
        .list::<TelemetryLogsProfile>(
            &ctx,
            &ListParams {
                site_id: Some(site_id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(direct.items.is_empty());

    let inherited = adapter
        .list::<TelemetryLogsProfile>(
            &ctx,
            &ListParams {
                site_id: Some(site_id),
                show_inherited: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(inherited.items.len(), 1);
    assert_eq!(inherited.items[0].target_region.as_deref(), Some(region_id.as_str()));
    assert_eq!(
        inherited.items[0].logs_group.as_ref().unwrap().name.as_deref(),
        Some("syslog")
    );
}

#[tokio::test]
async fn region_listing_can_count_sites() {
    let (adapter, ctx) = setup().await;
    let busy = region(&adapter, &ctx, "busy", &[]).await;
    region(&adapter, &ctx, "empty", &[]).await;
    site(&adapter, &ctx, "s1", &busy).await;
    site(&adapter, &ctx, "s2", &busy).await;

    let listed = adapter
        .list::<Region>(
            &ctx,
            &ListParams {
                show_total_sites: Some(true),
                order_by: Some("name".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let counts: Vec<_> = listed.items.iter().map(|r| r.total_sites).collect();
    assert_eq!(counts, [Some(2), Some(0)]);

    let plain = adapter.list::<Region>(&ctx, &page(None)).await.unwrap();
    assert!(plain.items.iter().all(|r| r.total_sites.is_none()));
}

#[tokio::test]
async fn host_lifecycle() {
    let (adapter, ctx) = setup().await;
    let registered = adapter
        .register_host(
            &ctx,
            &HostRegister {
                name: Some("edge-01".into()),
                serial_number: Some("SN-1".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(registered.desired_state.as_deref(), Some("HOST_STATE_REGISTERED"));
    let id = registered.resource_id.unwrap();

    let renamed = adapter
        .update_host_registration(
            &ctx,
            &id,
            &HostRegister {
                name: Some("edge-01b".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name.as_deref(), Some("edge-01b"));
    assert_eq!(renamed.serial_number.as_deref(), Some("SN-1"));

    let onboarded = adapter.onboard_host(&ctx, &id).await.unwrap();
    assert_eq!(onboarded.desired_state.as_deref(), Some("HOST_STATE_ONBOARDED"));
    assert_eq!(onboarded.name.as_deref(), Some("edge-01b"));

    let invalidated = adapter
        .invalidate_host(&ctx, &id, Some("stolen"))
        .await
        .unwrap();
    assert_eq!(invalidated.desired_state.as_deref(), Some("HOST_STATE_UNTRUSTED"));
    assert_eq!(invalidated.note.as_deref(), Some("stolen"));

    let err = adapter
        .register_host(&ctx, &HostRegister::default())
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn dispatch_routes_by_kind() {
    let (adapter, ctx) = setup().await;
    let created = adapter
        .dispatch(
            &ctx,
            Request::Create(WireResource::Region(Region {
                name: Some("emea".into()),
                ..Default::default()
            })),
        )
        .await
        .unwrap();
    let id = match created {
        Response::Resource(WireResource::Region(region)) => region.resource_id.unwrap(),
        other => panic!("unexpected response {other:?}"),
    };

    let listed = adapter
        .dispatch(
            &ctx,
            Request::List {
                kind: ApiKind::Region,
                params: ListParams::default(),
            },
        )
        .await
        .unwrap();
    match listed {
        Response::List(envelope) => assert_eq!(envelope.total_elements, 1),
        other => panic!("unexpected response {other:?}"),
    }

    let deleted = adapter
        .dispatch(
            &ctx,
            Request::Delete {
                kind: ApiKind::Region,
                id: id.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(deleted, Response::Deleted);

    let err = adapter
        .dispatch(&ctx, Request::Get { kind: ApiKind::Region, id })
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = adapter
        .dispatch(
            &ctx,
            Request::Patch {
                id: "workloadmember-0000abcd".into(),
                resource: WireResource::WorkloadMember(WorkloadMember::default()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, InfraError::Unimplemented(_)));
}

#[tokio::test]
async fn unknown_filter_fields_are_rejected() {
    let (adapter, ctx) = setup().await;
    let err = adapter
        .list::<Site>(
            &ctx,
            &ListParams {
                filter: Some(r#"altitude > 3"#.into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());

    let err = adapter
        .list::<Site>(
            &ctx,
            &ListParams {
                order_by: Some("altitude".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn tenants_do_not_see_each_other() {
    let (adapter, ctx) = setup().await;
    let id = region(&adapter, &ctx, "emea", &[]).await;
    let other = RequestContext::new(Uuid::new_v4());
    assert!(adapter.get::<Region>(&other, &id).await.unwrap_err().is_not_found());
    let listed = adapter.list::<Region>(&other, &page(None)).await.unwrap();
    assert_eq!(listed.total_elements, 0);
}
