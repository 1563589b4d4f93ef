//! Composition root: stores, the realtime core, handlers and the router.
//!
//! ```text
//! Stores ──► application handlers ──► RealtimeFanout ──► RoomBroadcaster
//!                     ▲                                         │
//!               REST routes                                RoomRegistry ◄── /ws sessions
//! ```

use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;

use crate::adapters::http::{
    api_router, AdminHandlers, ApiRoutes, ChatHandlers, NotificationHandlers, TaskHandlers,
};
use crate::adapters::memory::{
    InMemoryChatMessageRepository, InMemoryNotificationRepository, InMemoryTaskRepository,
    InMemoryUserDirectory,
};
use crate::adapters::postgres::{
    PostgresChatMessageRepository, PostgresNotificationRepository, PostgresTaskRepository,
    PostgresUserDirectory,
};
use crate::adapters::websocket::{RoomBroadcaster, RoomRegistry, TypingRelay, WebSocketState};
use crate::application::handlers::admin::{
    GetAnalyticsHandler, ListAgentAccountsHandler, ListAgentTasksHandler,
};
use crate::application::handlers::chat::{
    GetOverseerHandler, ListConversationHandler, SendMessageHandler,
};
use crate::application::handlers::notification::{
    ListMyNotificationsHandler, MarkNotificationReadHandler,
};
use crate::application::handlers::task::{
    CreateTaskHandler, DeleteTaskHandler, ListFieldAgentsHandler, ListMyTasksHandler,
    ListTasksHandler, UpdateMyTaskStatusHandler, UpdateTaskHandler,
};
use crate::application::RealtimeFanout;
use crate::config::{RealtimeConfig, ServerConfig};
use crate::domain::foundation::{Role, Timestamp, UserId, ValidationError};
use crate::domain::user::UserSummary;
use crate::ports::{
    Broadcaster, ChatMessageRepository, NotificationRepository, SessionValidator, TaskRepository,
    UserDirectory,
};

/// Number of Field Agent accounts in the demo directory.
pub const DEMO_FIELD_AGENTS: usize = 8;

/// Persistence ports the application runs on.
#[derive(Clone)]
pub struct Stores {
    pub tasks: Arc<dyn TaskRepository>,
    pub notifications: Arc<dyn NotificationRepository>,
    pub messages: Arc<dyn ChatMessageRepository>,
    pub users: Arc<dyn UserDirectory>,
}

impl Stores {
    /// Process-local stores; state is lost on restart.
    pub fn in_memory(users: InMemoryUserDirectory) -> Self {
        Self {
            tasks: Arc::new(InMemoryTaskRepository::new()),
            notifications: Arc::new(InMemoryNotificationRepository::new()),
            messages: Arc::new(InMemoryChatMessageRepository::new()),
            users: Arc::new(users),
        }
    }

    pub fn postgres(pool: PgPool) -> Self {
        Self {
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
            notifications: Arc::new(PostgresNotificationRepository::new(pool.clone())),
            messages: Arc::new(PostgresChatMessageRepository::new(pool.clone())),
            users: Arc::new(PostgresUserDirectory::new(pool)),
        }
    }
}

/// A fully wired application.
pub struct Application {
    pub registry: Arc<RoomRegistry>,
    pub broadcaster: Arc<dyn Broadcaster>,
    pub fanout: Arc<RealtimeFanout>,
    pub router: Router,
}

impl Application {
    pub fn build(
        stores: Stores,
        validator: Arc<dyn SessionValidator>,
        server: &ServerConfig,
        realtime: &RealtimeConfig,
    ) -> Self {
        let registry = Arc::new(RoomRegistry::new(realtime.session_channel_capacity));
        let broadcaster: Arc<dyn Broadcaster> = Arc::new(RoomBroadcaster::new(
            registry.clone(),
            stores.tasks.clone(),
        ));
        let fanout = Arc::new(RealtimeFanout::new(
            stores.notifications.clone(),
            broadcaster.clone(),
        ));

        let tasks = TaskHandlers::new(
            Arc::new(CreateTaskHandler::new(stores.tasks.clone(), fanout.clone())),
            Arc::new(UpdateTaskHandler::new(stores.tasks.clone(), fanout.clone())),
            Arc::new(DeleteTaskHandler::new(stores.tasks.clone(), fanout.clone())),
            Arc::new(UpdateMyTaskStatusHandler::new(
                stores.tasks.clone(),
                fanout.clone(),
            )),
            Arc::new(ListTasksHandler::new(stores.tasks.clone())),
            Arc::new(ListMyTasksHandler::new(stores.tasks.clone())),
            Arc::new(ListFieldAgentsHandler::new(stores.users.clone())),
        );
        let notifications = NotificationHandlers::new(
            Arc::new(ListMyNotificationsHandler::new(stores.notifications.clone())),
            Arc::new(MarkNotificationReadHandler::new(stores.notifications.clone())),
        );
        let chat = ChatHandlers::new(
            Arc::new(SendMessageHandler::new(
                stores.messages.clone(),
                stores.users.clone(),
                broadcaster.clone(),
            )),
            Arc::new(ListConversationHandler::new(stores.messages.clone())),
            Arc::new(GetOverseerHandler::new(stores.users.clone())),
        );
        let admin = AdminHandlers::new(
            Arc::new(GetAnalyticsHandler::new(
                stores.tasks.clone(),
                stores.users.clone(),
                stores.notifications.clone(),
            )),
            Arc::new(ListAgentAccountsHandler::new(stores.users.clone())),
            Arc::new(ListAgentTasksHandler::new(
                stores.tasks.clone(),
                stores.users.clone(),
            )),
        );
        let ws = WebSocketState::new(
            registry.clone(),
            validator.clone(),
            TypingRelay::new(broadcaster.clone()),
        )
        .with_heartbeat_interval(realtime.heartbeat_interval());

        let router = api_router(
            ApiRoutes {
                tasks,
                notifications,
                chat,
                admin,
                realtime: ws,
            },
            validator,
            server,
        );

        Self {
            registry,
            broadcaster,
            fanout,
            router,
        }
    }
}

/// Accounts for local runs without a database: one Overseer (`santa`) and
/// Field Agents `elf01`..`elf08`. Ids equal usernames.
pub fn demo_users() -> Result<Vec<UserSummary>, ValidationError> {
    let seeded_at = Timestamp::now();
    let overseer = std::iter::once(("santa".to_string(), Role::Overseer));
    let agents = (1..=DEMO_FIELD_AGENTS).map(|n| (format!("elf{:02}", n), Role::FieldAgent));

    overseer
        .chain(agents)
        .map(|(name, role)| {
            Ok(UserSummary::new(UserId::new(name.clone())?, name, role).registered_at(seeded_at))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_directory_has_one_overseer() {
        let users = demo_users().unwrap();
        assert_eq!(users.len(), DEMO_FIELD_AGENTS + 1);
        assert_eq!(
            users.iter().filter(|u| u.role == Role::Overseer).count(),
            1
        );
        assert_eq!(users[1].id.as_str(), "elf01");
        assert_eq!(users[8].username, "elf08");
    }
}
