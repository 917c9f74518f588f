#[cfg(test)]
mod integration_test;

use std::sync::Arc;

use dao_impl_sqlite::{booking::BookingDaoImpl, PermissionDaoImpl};
use sqlx::SqlitePool;
#[cfg(feature = "json_logging")]
use tracing_subscriber::fmt::format::FmtSpan;

#[cfg(feature = "mock_auth")]
type UserService = service_impl::UserServiceDev;
#[cfg(feature = "header_auth")]
type UserService = service_impl::UserServiceImpl;
type PermissionDao = PermissionDaoImpl;
type BookingDao = BookingDaoImpl;

type PermissionService = service_impl::PermissionServiceImpl<PermissionDao, UserService>;
type ClockService = service_impl::clock::ClockServiceImpl;
type UuidService = service_impl::uuid_service::UuidServiceImpl;
type BookingService = service_impl::booking::BookingServiceImpl<
    BookingDao,
    PermissionService,
    ClockService,
    UuidService,
>;
type ScheduleService =
    service_impl::schedule::ScheduleServiceImpl<BookingService, PermissionService, ClockService>;

#[derive(Clone)]
pub struct RestStateImpl {
    permission_service: Arc<PermissionService>,
    booking_service: Arc<BookingService>,
    schedule_service: Arc<ScheduleService>,
}
impl rest::RestStateDef for RestStateImpl {
    type BookingService = BookingService;
    type ScheduleService = ScheduleService;
    type PermissionService = PermissionService;

    fn backend_version(&self) -> Arc<str> {
        Arc::from(env!("CARGO_PKG_VERSION"))
    }

    fn booking_service(&self) -> Arc<Self::BookingService> {
        self.booking_service.clone()
    }
    fn schedule_service(&self) -> Arc<Self::ScheduleService> {
        self.schedule_service.clone()
    }
    fn permission_service(&self) -> Arc<Self::PermissionService> {
        self.permission_service.clone()
    }
}
impl RestStateImpl {
    pub fn new(pool: Arc<sqlx::Pool<sqlx::Sqlite>>) -> Self {
        let permission_dao = Arc::new(PermissionDao::new(pool.clone()));
        let booking_dao = Arc::new(BookingDao::new(pool.clone()));

        #[cfg(feature = "mock_auth")]
        let user_service = Arc::new(service_impl::UserServiceDev);
        #[cfg(feature = "header_auth")]
        let user_service = Arc::new(service_impl::UserServiceImpl);

        let permission_service = Arc::new(PermissionService::new(permission_dao, user_service));
        let clock_service = Arc::new(service_impl::clock::ClockServiceImpl);
        let uuid_service = Arc::new(service_impl::uuid_service::UuidServiceImpl);
        let booking_service = Arc::new(BookingService::new(
            booking_dao,
            permission_service.clone(),
            clock_service.clone(),
            uuid_service.clone(),
        ));
        let schedule_service = Arc::new(ScheduleService::new(
            booking_service.clone(),
            permission_service.clone(),
            clock_service.clone(),
        ));

        Self {
            permission_service,
            booking_service,
            schedule_service,
        }
    }
}

async fn create_admin_user(pool: Arc<SqlitePool>, username: &str) {
    use dao::PermissionDao;
    // On first start create the administration account so the schedule
    // can be managed without touching the database by hand.
    let permission_dao = PermissionDaoImpl::new(pool.clone());

    let users = permission_dao.all_users().await.expect("Expected users");
    let contains_admin_user = users.iter().any(|user| user.name.as_ref() == username);
    if !contains_admin_user {
        permission_dao
            .create_user(
                &dao::UserEntity {
                    name: username.into(),
                },
                "first-start",
            )
            .await
            .expect("Expected being able to create the admin user");
        permission_dao
            .add_user_role(username, "admin", "first-start")
            .await
            .expect("Expected being able to grant the admin role");
    }
}

#[tokio::main]
async fn main() {
    let version = env!("CARGO_PKG_VERSION");

    #[cfg(feature = "local_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .pretty()
        .with_file(true)
        .finish();

    #[cfg(feature = "json_logging")]
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_span_list(true)
        .with_file(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    tracing::info!("Turfbook backend version: {}", version);
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./localdb.sqlite3?mode=rwc".to_string());
    let pool = Arc::new(
        SqlitePool::connect(&database_url)
            .await
            .expect("Could not connect to database"),
    );

    sqlx::migrate!("../migrations/sqlite")
        .run(pool.as_ref())
        .await
        .expect("Failed to run migrations");

    let rest_state = RestStateImpl::new(pool.clone());
    create_admin_user(pool.clone(), "DEVUSER").await;
    create_admin_user(pool.clone(), "admin").await;

    rest::start_server(rest_state).await
}
