//! Integration tests for the membership gate and tenant-scoped
//! services against in-memory SurrealDB.

use sealbox_core::models::membership::{CreateMembership, MembershipRole};
use sealbox_core::models::organization::{CreateOrganization, RESERVED_DEMO_SLUG};
use sealbox_core::models::provider::Provider;
use sealbox_core::models::tenant_config::UpdateTenantConfig;
use sealbox_core::models::user::CreateUser;
use sealbox_core::repository::{
    MembershipRepository, OrganizationRepository, ProviderKeyRepository, TenantConfigRepository,
    UserRepository,
};
use sealbox_crypto::SecretCipher;
use sealbox_db::repository::{
    SurrealMembershipRepository, SurrealOrganizationRepository, SurrealProviderKeyRepository,
    SurrealTenantConfigRepository, SurrealUserRepository,
};
use sealbox_tenant::{
    OnboardingService, OnboardingUpdate, ProviderKeyService, TenantAccessError, TenantGate,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

type Db = surrealdb::engine::local::Db;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    sealbox_db::run_migrations(&db).await.unwrap();
    db
}

fn gate(db: &Surreal<Db>) -> TenantGate<SurrealOrganizationRepository<Db>, SurrealMembershipRepository<Db>> {
    TenantGate::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealMembershipRepository::new(db.clone()),
    )
}

fn cipher() -> SecretCipher {
    SecretCipher::new([42u8; 32])
}

fn key_service(
    db: &Surreal<Db>,
) -> ProviderKeyService<
    SurrealOrganizationRepository<Db>,
    SurrealMembershipRepository<Db>,
    SurrealProviderKeyRepository<Db>,
> {
    ProviderKeyService::new(
        gate(db),
        SurrealProviderKeyRepository::new(db.clone()),
        cipher(),
    )
}

/// Helper: create a user and an organization bound by an OWNER
/// membership; returns `(user_id, organization_id)`.
async fn provision(db: &Surreal<Db>, email: &str, slug: &str) -> (Uuid, Uuid) {
    let user = SurrealUserRepository::new(db.clone())
        .create(CreateUser {
            email: email.into(),
            name: None,
            password_hash: "hash".into(),
        })
        .await
        .unwrap();
    let org = SurrealOrganizationRepository::new(db.clone())
        .create(CreateOrganization {
            name: format!("Org {slug}"),
            slug: slug.into(),
        })
        .await
        .unwrap();
    SurrealMembershipRepository::new(db.clone())
        .create(CreateMembership {
            user_id: user.id,
            organization_id: org.id,
            role: MembershipRole::Owner,
        })
        .await
        .unwrap();
    (user.id, org.id)
}

#[tokio::test]
async fn members_cannot_cross_tenant_boundaries() {
    let db = setup().await;
    let (user_a, org_a) = provision(&db, "a@iso.test", "iso-a").await;
    let (user_b, org_b) = provision(&db, "b@iso.test", "iso-b").await;
    let gate = gate(&db);

    // Each member reaches their own workspace.
    assert_eq!(gate.tenant_id_for("iso-a", user_a).await.unwrap(), org_a);
    assert_eq!(gate.tenant_id_for("iso-b", user_b).await.unwrap(), org_b);

    // Crossing the boundary is Forbidden, in both directions.
    assert!(matches!(
        gate.require_tenant("iso-b", user_a).await.unwrap_err(),
        TenantAccessError::Forbidden { .. }
    ));
    assert!(matches!(
        gate.require_tenant("iso-a", user_b).await.unwrap_err(),
        TenantAccessError::Forbidden { .. }
    ));
}

#[tokio::test]
async fn scoped_queries_only_see_their_own_rows() {
    let db = setup().await;
    let (user_a, org_a) = provision(&db, "a@scope.test", "scope-a").await;
    let (_user_b, org_b) = provision(&db, "b@scope.test", "scope-b").await;

    let configs = SurrealTenantConfigRepository::new(db.clone());
    configs
        .ensure_default(org_a)
        .await
        .unwrap();
    configs.ensure_default(org_b).await.unwrap();
    configs
        .update(
            org_b,
            UpdateTenantConfig {
                use_case: Some("B's secret plan".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // The only tenant id user A can obtain is A's...
    let tenant_id = gate(&db).tenant_id_for("scope-a", user_a).await.unwrap();
    assert_eq!(tenant_id, org_a);

    // ...and a query scoped by it returns only A's config.
    let config = configs.find(tenant_id).await.unwrap().unwrap();
    assert_eq!(config.organization_id, org_a);
    assert!(config.use_case.is_none());
}

#[tokio::test]
async fn unknown_slug_is_not_found_even_for_valid_users() {
    let db = setup().await;
    let (user_a, _org_a) = provision(&db, "a@nf.test", "nf-a").await;

    let err = gate(&db)
        .require_tenant("nonexistent-slug", user_a)
        .await
        .unwrap_err();
    assert!(matches!(err, TenantAccessError::NotFound { .. }));
}

#[tokio::test]
async fn saved_keys_round_trip_through_the_store() {
    let db = setup().await;
    let (user, org) = provision(&db, "keys@rt.test", "rt-org").await;
    let service = key_service(&db);

    service
        .save_key("rt-org", user, Provider::Anthropic, "sk-ant-first")
        .await
        .unwrap();
    // Overwrite: last writer wins.
    service
        .save_key("rt-org", user, Provider::Anthropic, "sk-ant-second")
        .await
        .unwrap();

    let stored = SurrealProviderKeyRepository::new(db.clone())
        .find(org, Provider::Anthropic)
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.encrypted_key, "sk-ant-second");
    assert_eq!(cipher().decrypt(&stored.encrypted_key).unwrap(), "sk-ant-second");

    assert_eq!(
        service.configured_providers("rt-org", user).await.unwrap(),
        vec![Provider::Anthropic]
    );
}

#[tokio::test]
async fn demo_workspace_rejects_all_mutation() {
    let db = setup().await;
    sealbox_db::seed_demo(&db).await.unwrap();

    let demo_user = SurrealUserRepository::new(db.clone())
        .find_by_email(sealbox_db::DEMO_EMAIL)
        .await
        .unwrap()
        .unwrap();

    // The demo member passes the membership gate...
    let demo_org = gate(&db)
        .require_tenant(RESERVED_DEMO_SLUG, demo_user.id)
        .await
        .unwrap();
    assert_eq!(demo_org.slug, RESERVED_DEMO_SLUG);

    // ...but key saves are rejected with the Locked kind.
    let err = key_service(&db)
        .save_key(RESERVED_DEMO_SLUG, demo_user.id, Provider::OpenAi, "sk-x")
        .await
        .unwrap_err();
    assert!(matches!(err, TenantAccessError::Locked));

    // Onboarding mutation is rejected the same way.
    let onboarding = OnboardingService::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealMembershipRepository::new(db.clone()),
        SurrealTenantConfigRepository::new(db.clone()),
        SurrealProviderKeyRepository::new(db.clone()),
        cipher(),
    );
    let err = onboarding
        .apply(
            RESERVED_DEMO_SLUG,
            demo_user.id,
            OnboardingUpdate {
                organization_name: Some("Not Yours".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, TenantAccessError::Locked));
}

#[tokio::test]
async fn onboarding_flow_end_to_end() {
    let db = setup().await;
    let (user, org) = provision(&db, "wizard@ob.test", "wizard-org").await;

    let onboarding = OnboardingService::new(
        SurrealOrganizationRepository::new(db.clone()),
        SurrealMembershipRepository::new(db.clone()),
        SurrealTenantConfigRepository::new(db.clone()),
        SurrealProviderKeyRepository::new(db.clone()),
        cipher(),
    );

    let config = onboarding
        .apply(
            "wizard-org",
            user,
            OnboardingUpdate {
                organization_name: Some("Wizard Inc".into()),
                config: UpdateTenantConfig {
                    use_case: Some("Docs copilot".into()),
                    provider_order: Some(vec![Provider::Gemini, Provider::OpenAi]),
                    ..Default::default()
                },
                provider_keys: vec![(Provider::Gemini, "gm-key".into())],
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(config.use_case.as_deref(), Some("Docs copilot"));
    assert_eq!(config.provider_order, vec![Provider::Gemini, Provider::OpenAi]);

    let renamed = SurrealOrganizationRepository::new(db.clone())
        .get_by_id(org)
        .await
        .unwrap();
    assert_eq!(renamed.name, "Wizard Inc");

    let stored = SurrealProviderKeyRepository::new(db.clone())
        .find(org, Provider::Gemini)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cipher().decrypt(&stored.encrypted_key).unwrap(), "gm-key");
}
