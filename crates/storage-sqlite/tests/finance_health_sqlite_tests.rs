//! End-to-end checks of the financial health service over the SQLite repositories.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};

use salonbook_core::appointments::{AppointmentService, AppointmentServiceTrait, AppointmentStatus, NewAppointment};
use salonbook_core::catalog::{CatalogService, CatalogServiceTrait, NewSalonService};
use salonbook_core::costs::{CostService, CostServiceTrait, NewFixedCost};
use salonbook_core::errors::{DatabaseError, Error};
use salonbook_core::events::{DomainEventSink, FanOutDomainEventSink, NoOpDomainEventSink};
use salonbook_core::health::{AdviceKind, FinancialHealthService, FinancialHealthServiceTrait, GoalStatus};
use salonbook_core::settings::{
    FinanceSettingsService, FinanceSettingsServiceTrait, FinanceSettingsUpdate,
};
use salonbook_storage_sqlite::{
    create_pool, run_migrations, spawn_writer, AppointmentRepository, CatalogRepository,
    CostRepository, FinanceSettingsRepository,
};

const ACCOUNT: &str = "salon-1";

struct Salon {
    appointments: AppointmentService,
    catalog: CatalogService,
    costs: CostService,
    settings: FinanceSettingsService,
    health: FinancialHealthService,
    _dir: TempDir,
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn open_salon() -> Salon {
    let dir = tempdir().expect("Failed to create temp directory");
    let db_path = dir.path().join("salon.db").to_string_lossy().to_string();
    let pool = create_pool(&db_path).expect("Failed to create pool");
    run_migrations(&pool).expect("Failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    let appointment_repo = Arc::new(AppointmentRepository::new(pool.clone(), writer.clone()));
    let catalog_repo = Arc::new(CatalogRepository::new(pool.clone(), writer.clone()));
    let cost_repo = Arc::new(CostRepository::new(pool.clone(), writer.clone()));
    let settings_repo = Arc::new(FinanceSettingsRepository::new(pool.clone(), writer));

    let settings_reader = Arc::new(FinanceSettingsService::new(
        settings_repo.clone(),
        Arc::new(NoOpDomainEventSink),
    ));
    let health = FinancialHealthService::new(
        appointment_repo.clone(),
        catalog_repo.clone(),
        cost_repo.clone(),
        settings_reader,
    );

    let events: Arc<dyn DomainEventSink> =
        Arc::new(FanOutDomainEventSink::default().with_sink(Arc::new(health.recompute_sink())));

    Salon {
        appointments: AppointmentService::new(appointment_repo, events.clone()),
        catalog: CatalogService::new(catalog_repo, events.clone()),
        costs: CostService::new(cost_repo, events.clone()),
        settings: FinanceSettingsService::new(settings_repo, events),
        health,
        _dir: dir,
    }
}

fn booking(date: NaiveDate, price: rust_decimal::Decimal, status: AppointmentStatus) -> NewAppointment {
    NewAppointment {
        id: None,
        account_id: ACCOUNT.to_string(),
        date,
        price,
        status,
        client_name: Some("Carla".to_string()),
        service_name: None,
    }
}

async fn seed(salon: &Salon) {
    salon
        .settings
        .update_settings(
            ACCOUNT,
            &FinanceSettingsUpdate {
                monthly_goal: Some(dec!(3000)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    for (name, price) in [("Coloração", dec!(180)), ("Escova", dec!(45))] {
        salon
            .catalog
            .create_service(NewSalonService {
                id: None,
                account_id: ACCOUNT.to_string(),
                name: name.to_string(),
                price,
            })
            .await
            .unwrap();
    }

    salon
        .costs
        .create_fixed_cost(NewFixedCost {
            id: None,
            account_id: ACCOUNT.to_string(),
            name: "Aluguel".to_string(),
            amount: dec!(900),
            day_due: 15,
            paid: false,
        })
        .await
        .unwrap();

    let may = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
    for (date, price, status) in [
        (today(), dec!(200), AppointmentStatus::Confirmed),
        (today(), dec!(100), AppointmentStatus::Confirmed),
        (today(), dec!(80), AppointmentStatus::Pending),
        (may, dec!(500), AppointmentStatus::Confirmed),
    ] {
        salon
            .appointments
            .create_appointment(booking(date, price, status))
            .await
            .unwrap();
    }

    salon
        .appointments
        .record_daily_revenue(ACCOUNT, today(), dec!(60))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_snapshot_from_persisted_ledger() {
    let salon = open_salon();
    seed(&salon).await;

    let snapshot = salon.health.get_financial_health(ACCOUNT, today()).unwrap();

    assert_eq!(snapshot.monthly_revenue, dec!(300));
    assert_eq!(snapshot.confirmed_appointments, 2);
    assert_eq!(snapshot.average_ticket, dec!(150));
    assert_eq!(snapshot.daily_revenue, dec!(60));
    assert_eq!(snapshot.daily_goal_target, dec!(100));
    assert_eq!(snapshot.goal_gap, dec!(40));
    assert_eq!(snapshot.goal_status, GoalStatus::Behind);
    assert_eq!(snapshot.total_fixed_costs, dec!(900));
    assert_eq!(snapshot.bills_due_today, dec!(900));
    assert_eq!(snapshot.bills_due_this_week, dec!(900));

    let combo = snapshot.combo_suggestion.expect("combo expected while behind");
    assert_eq!(combo.main_service, "Coloração");
    assert_eq!(combo.secondary_service, "Escova");
    assert_eq!(combo.original_price, dec!(225));
    assert_eq!(combo.combo_price, dec!(193.5));
    assert_eq!(
        snapshot.advice.map(|a| a.kind),
        Some(AdviceKind::ComboOffer)
    );
}

#[tokio::test]
async fn test_writes_through_services_refresh_the_snapshot() {
    let salon = open_salon();
    seed(&salon).await;

    let before = salon.health.get_financial_health(ACCOUNT, today()).unwrap();
    assert_eq!(before.monthly_revenue, dec!(300));

    salon
        .appointments
        .create_appointment(booking(today(), dec!(150), AppointmentStatus::Confirmed))
        .await
        .unwrap();
    salon
        .appointments
        .record_daily_revenue(ACCOUNT, today(), dec!(120))
        .await
        .unwrap();

    let after = salon.health.get_financial_health(ACCOUNT, today()).unwrap();
    assert_eq!(after.monthly_revenue, dec!(450));
    assert_eq!(after.confirmed_appointments, 3);
    assert_eq!(after.goal_status, GoalStatus::Ahead);
    assert!(after.combo_suggestion.is_none());

    let rent = salon.costs.get_fixed_costs(ACCOUNT).unwrap().remove(0);
    salon
        .costs
        .set_fixed_cost_paid(ACCOUNT, &rent.id, true)
        .await
        .unwrap();
    let paid = salon.health.get_financial_health(ACCOUNT, today()).unwrap();
    assert_eq!(paid.bills_due_today, dec!(0));
    assert_eq!(paid.total_fixed_costs, dec!(900));
}

#[tokio::test]
async fn test_other_account_cannot_confirm_this_salons_booking() {
    let salon = open_salon();
    seed(&salon).await;
    let before = salon.health.get_financial_health(ACCOUNT, today()).unwrap();

    let pending = salon
        .appointments
        .get_appointments(ACCOUNT)
        .unwrap()
        .into_iter()
        .find(|a| a.status == AppointmentStatus::Pending)
        .unwrap();
    let result = salon
        .appointments
        .update_appointment_status("salon-2", &pending.id, AppointmentStatus::Confirmed)
        .await;
    assert!(matches!(
        result,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));

    let after = salon.health.get_financial_health(ACCOUNT, today()).unwrap();
    assert_eq!(after, before);
    assert_eq!(after.monthly_revenue, dec!(300));
}

#[tokio::test]
async fn test_disabling_a_fund_changes_allocation() {
    let salon = open_salon();
    seed(&salon).await;

    let before = salon.health.get_financial_health(ACCOUNT, today()).unwrap();
    assert_eq!(before.fund_amount("default-emergency"), dec!(15));
    assert_eq!(before.fund_amount("default-maintenance"), dec!(30));

    salon
        .settings
        .update_fund(
            ACCOUNT,
            "default-maintenance",
            &salonbook_core::settings::FundPatch {
                enabled: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let after = salon.health.get_financial_health(ACCOUNT, today()).unwrap();
    assert_eq!(after.fund_amount("default-maintenance"), dec!(0));
    assert_eq!(after.total_fund_allocation, dec!(15));
}
