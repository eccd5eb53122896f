//! The resend workflow: dual-code numbers, preserved dates, and the rules
//! guarding who and what can move.

mod common;

use test_context::test_context;

use common::{
    create_superuser, create_test_record, create_test_user, department_named,
    force_digital_number, force_status, TestHarness,
};
use expedientes_core::common::RecordError;
use expedientes_core::domains::records::actions::transfer_record;
use expedientes_core::domains::records::models::Record;

#[test_context(TestHarness)]
#[tokio::test]
async fn transfer_builds_dual_code_number_and_sets_in_progress(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let admin = create_superuser(&ctx.db_pool).await.unwrap();
    let obras = department_named(&ctx.db_pool, "Obras Públicas").await.unwrap();
    let cultura = department_named(&ctx.db_pool, "Cultura").await.unwrap();

    let record = create_test_record(&admin, obras.id, "Juan Perez", Some("0007"), &deps)
        .await
        .unwrap();
    // Pin the creation date so the preserved-date assertion is exact.
    force_digital_number(&ctx.db_pool, &record, "OP-0007-01-03-2024")
        .await
        .unwrap();

    let outcome = transfer_record(&admin, record.id, cultura.id, &deps)
        .await
        .unwrap();

    assert!(outcome.transferred);
    assert_eq!(outcome.record.digital_number, "OP-CU-0007-01-03-2024");
    assert_eq!(outcome.record.status, "in_progress");
    assert_eq!(outcome.record.department_id, cultura.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unparseable_previous_number_aborts_without_writing(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let admin = create_superuser(&ctx.db_pool).await.unwrap();
    let obras = department_named(&ctx.db_pool, "Obras Públicas").await.unwrap();
    let cultura = department_named(&ctx.db_pool, "Cultura").await.unwrap();

    let record = create_test_record(&admin, obras.id, "Juan Perez", None, &deps)
        .await
        .unwrap();
    force_digital_number(&ctx.db_pool, &record, "BADFORMAT")
        .await
        .unwrap();

    let err = transfer_record(&admin, record.id, cultura.id, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Conflict(_)));

    // Nothing moved: number, status, and department are untouched.
    let unchanged = Record::find_by_id(record.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.digital_number, "BADFORMAT");
    assert_eq!(unchanged.status, "pending");
    assert_eq!(unchanged.department_id, obras.id);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn same_department_transfer_is_a_no_op(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let admin = create_superuser(&ctx.db_pool).await.unwrap();
    let obras = department_named(&ctx.db_pool, "Obras Públicas").await.unwrap();

    let record = create_test_record(&admin, obras.id, "Juan Perez", None, &deps)
        .await
        .unwrap();
    let number_before = record.digital_number.clone();

    let outcome = transfer_record(&admin, record.id, obras.id, &deps)
        .await
        .unwrap();

    assert!(!outcome.transferred);
    assert!(outcome.message.unwrap().contains("Obras Públicas"));
    assert_eq!(outcome.record.digital_number, number_before);
    assert_eq!(outcome.record.status, "pending");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn status_check_wins_over_the_same_department_no_op(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let admin = create_superuser(&ctx.db_pool).await.unwrap();
    let obras = department_named(&ctx.db_pool, "Obras Públicas").await.unwrap();
    let cultura = department_named(&ctx.db_pool, "Cultura").await.unwrap();

    let record = create_test_record(&admin, obras.id, "Juan Perez", None, &deps)
        .await
        .unwrap();
    transfer_record(&admin, record.id, cultura.id, &deps)
        .await
        .unwrap();

    // The record is now in_progress in Cultura. Resending it to Cultura
    // again is refused for its status, not waved through as a no-op.
    let err = transfer_record(&admin, record.id, cultura.id, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Validation(_)));
    assert!(err.to_string().contains("in_progress"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_intendencia_admins_or_the_superuser_may_transfer(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let admin = create_superuser(&ctx.db_pool).await.unwrap();
    let obras = department_named(&ctx.db_pool, "Obras Públicas").await.unwrap();
    let cultura = department_named(&ctx.db_pool, "Cultura").await.unwrap();

    let record = create_test_record(&admin, obras.id, "Juan Perez", None, &deps)
        .await
        .unwrap();

    // An admin of another department is refused.
    let cultura_admin = create_test_user(&ctx.db_pool, "jose", "admin", "Cultura")
        .await
        .unwrap();
    let err = transfer_record(&cultura_admin, record.id, cultura.id, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Authorization(_)));

    // An Intendencia admin is allowed.
    let intendencia_admin = create_test_user(&ctx.db_pool, "maria", "admin", "Intendencia")
        .await
        .unwrap();
    let outcome = transfer_record(&intendencia_admin, record.id, cultura.id, &deps)
        .await
        .unwrap();
    assert!(outcome.transferred);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_pending_and_urgente_records_are_transferable(ctx: &mut TestHarness) {
    let deps = ctx.deps();
    let admin = create_superuser(&ctx.db_pool).await.unwrap();
    let obras = department_named(&ctx.db_pool, "Obras Públicas").await.unwrap();
    let cultura = department_named(&ctx.db_pool, "Cultura").await.unwrap();
    let hacienda = department_named(&ctx.db_pool, "Hacienda").await.unwrap();

    let record = create_test_record(&admin, obras.id, "Juan Perez", None, &deps)
        .await
        .unwrap();

    // A transferred record is in_progress and cannot move again.
    transfer_record(&admin, record.id, cultura.id, &deps)
        .await
        .unwrap();
    let err = transfer_record(&admin, record.id, hacienda.id, &deps)
        .await
        .unwrap_err();
    assert!(matches!(err, RecordError::Validation(_)));

    // Urgente records still qualify.
    let record = Record::find_by_id(record.id, &ctx.db_pool)
        .await
        .unwrap()
        .unwrap();
    force_status(&ctx.db_pool, &record, "urgente").await.unwrap();
    let outcome = transfer_record(&admin, record.id, hacienda.id, &deps)
        .await
        .unwrap();
    assert!(outcome.transferred);
}
