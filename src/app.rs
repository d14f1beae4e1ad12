// SPDX-License-Identifier: MPL-2.0

use crate::api::{Application, JobPosting};
use crate::config::Config;
use crate::fl;
use crate::helpers::{self, BoardSnapshot};
use crate::pages;
use crate::pipeline::PipelineState;
use crate::widgets::kanban::{self, ColumnId, ItemId, KanbanEvent, KanbanMessage, MoveCommand};
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::{Length, Subscription};
use cosmic::prelude::*;
use cosmic::Application as _;
use cosmic::widget::{self, about::About, icon, menu, nav_bar};
use std::collections::HashMap;

const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");
const APP_ICON: &[u8] = include_bytes!("../resources/icons/hicolor/scalable/apps/icon.svg");

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    context_page: ContextPage,
    /// The about page for this app.
    about: About,
    /// Contains items assigned to the nav bar panel.
    nav: nav_bar::Model,
    /// Key bindings for the application's menu bar.
    key_binds: HashMap<menu::KeyBind, MenuAction>,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Cosmic config context for saving
    config_context: Option<cosmic_config::Config>,

    // === App-specific state ===
    /// Board contents, drag gesture and in-flight stage updates
    pub pipeline: PipelineState,
    /// Job filter entries; the first one is "all jobs"
    pub job_names: Vec<String>,
    /// Connection status
    pub connection_status: ConnectionStatus,
    /// Temporary server URL input (before saving)
    pub server_url_input: String,
    /// Temporary auth token input (before saving)
    pub auth_token_input: String,
    /// Settings save status
    pub settings_status: SettingsStatus,
    /// Active notifications to display
    pub notifications: Vec<Notification>,
    /// Counter for generating unique notification IDs
    pub notification_id_counter: u32,
}

#[derive(Debug, Clone, Default)]
pub enum SettingsStatus {
    #[default]
    Idle,
    Saved,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error(String),
}

/// Notification level/type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A notification message to display to the user
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u32,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation & UI
    LaunchUrl(String),
    ToggleContextPage(ContextPage),
    CloseContextDrawer,
    UpdateConfig(Config),

    // Settings inputs
    ServerUrlChanged(String),
    AuthTokenChanged(String),
    ToggleOptimisticMoves(bool),
    ToggleAppliedDate(bool),
    SaveSettings,

    // Connection & data
    TestConnection,
    ConnectionResult(Result<(), String>),
    FetchJobs,
    JobsLoaded(Result<Vec<JobPosting>, String>),
    /// Index into the job filter dropdown
    SelectJob(usize),
    FetchBoard,
    BoardLoaded {
        job_id: Option<i64>,
        result: Result<BoardSnapshot, String>,
    },

    // Board
    Kanban(KanbanMessage),
    MovePersisted {
        item_id: ItemId,
        result: Result<Application, String>,
    },

    // Notifications
    AddNotification(NotificationLevel, String, String),
    DismissNotification(u32),
    CopyNotification(u32),
}

/// Create a COSMIC application from the app model
impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "io.github.stageboard.Stageboard";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let mut nav = nav_bar::Model::default();

        nav.insert()
            .text(fl!("board"))
            .data::<Page>(Page::Board)
            .icon(icon::from_name("view-column-symbolic"))
            .activate();

        nav.insert()
            .text(fl!("settings"))
            .data::<Page>(Page::Settings)
            .icon(icon::from_name("preferences-system-symbolic"));

        // Create the about widget
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("CARGO_PKG_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let config_context = cosmic_config::Config::new(Self::APP_ID, Config::VERSION).ok();
        let config = config_context
            .as_ref()
            .map(|context| match Config::get_entry(context) {
                Ok(config) => config,
                Err((errors, config)) => {
                    tracing::warn!(?errors, "config entries could not be read, using defaults");
                    config
                }
            })
            .unwrap_or_default();

        let mut app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            nav,
            key_binds: HashMap::new(),
            server_url_input: config.server_url.clone(),
            auth_token_input: config.auth_token.clone(),
            config,
            config_context,
            pipeline: PipelineState::default(),
            job_names: vec![fl!("all-jobs")],
            connection_status: ConnectionStatus::Disconnected,
            settings_status: SettingsStatus::Idle,
            notifications: Vec::new(),
            notification_id_counter: 0,
        };

        let command = Task::batch(vec![
            app.update_title(),
            app.update(Message::FetchJobs),
            app.update(Message::FetchBoard),
        ]);

        (app, command)
    }

    /// Elements to pack at the start of the header bar.
    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        let menu_bar = menu::bar(vec![menu::Tree::with_children(
            menu::root(fl!("view")).apply(Element::from),
            menu::items(
                &self.key_binds,
                vec![menu::Item::Button(fl!("about"), None, MenuAction::About)],
            ),
        )]);

        vec![menu_bar.into()]
    }

    /// Enables the COSMIC application to create a nav bar with this model.
    fn nav_model(&self) -> Option<&nav_bar::Model> {
        Some(&self.nav)
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match &self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::ApplicationDetails => {
                let content = pages::widgets::application_details_view(self.pipeline.selected());
                context_drawer::context_drawer(content, Message::CloseContextDrawer)
                    .title(fl!("application-details"))
            }
            ContextPage::StageSummary(column) => {
                let content =
                    pages::widgets::stage_summary_view(self.pipeline.stage_summary(column));
                context_drawer::context_drawer(content, Message::CloseContextDrawer)
                    .title(fl!("stage-summary"))
            }
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        let space_s = cosmic::theme::spacing().space_s;
        let space_m = cosmic::theme::spacing().space_m;

        let page_content: Element<_> = match self.nav.active_data::<Page>().unwrap_or(&Page::Board)
        {
            Page::Board => pages::board::view(self, space_s, space_m),
            Page::Settings => pages::settings::view(self, space_s, space_m),
        };

        let mut content_column = widget::column::with_capacity(2).spacing(space_s);

        if !self.notifications.is_empty() {
            let notifications_row = widget::row::with_children(
                self.notifications
                    .iter()
                    .map(pages::widgets::notification_toast),
            )
            .spacing(space_s);
            content_column = content_column.push(notifications_row);
        }

        content_column = content_column.push(page_content);

        widget::container(content_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(space_m)
            .into()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let config = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // Pointer release and Escape only matter while a card is held.
        if self.pipeline.gesture.is_idle() {
            config
        } else {
            Subscription::batch(vec![config, kanban::drag_events().map(Message::Kanban)])
        }
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::ToggleContextPage(context_page) => {
                if self.context_page == context_page {
                    self.core.window.show_context = !self.core.window.show_context;
                } else {
                    self.context_page = context_page;
                    self.core.window.show_context = true;
                }
            }

            Message::CloseContextDrawer => {
                self.core.window.show_context = false;
            }

            Message::UpdateConfig(config) => {
                self.server_url_input = config.server_url.clone();
                self.auth_token_input = config.auth_token.clone();
                self.config = config;
            }

            Message::LaunchUrl(url) => {
                if let Err(err) = open::that_detached(&url) {
                    tracing::warn!(%url, %err, "failed to open url");
                }
            }

            // Settings inputs
            Message::ServerUrlChanged(url) => {
                self.server_url_input = url;
            }

            Message::AuthTokenChanged(token) => {
                self.auth_token_input = token;
            }

            Message::ToggleOptimisticMoves(enabled) => {
                self.config.optimistic_moves = enabled;
                return self.write_config();
            }

            Message::ToggleAppliedDate(enabled) => {
                self.config.show_applied_date = enabled;
                return self.write_config();
            }

            Message::SaveSettings => {
                self.config.server_url = self.server_url_input.trim().to_string();
                self.config.auth_token = self.auth_token_input.clone();
                self.settings_status = SettingsStatus::Idle;

                let saved = self.write_config();
                if matches!(self.settings_status, SettingsStatus::Error(_)) {
                    return saved;
                }

                return Task::batch(vec![
                    saved,
                    self.update(Message::AddNotification(
                        NotificationLevel::Success,
                        fl!("settings-saved"),
                        String::new(),
                    )),
                    self.update(Message::FetchJobs),
                    self.update(Message::FetchBoard),
                ]);
            }

            Message::TestConnection => {
                self.connection_status = ConnectionStatus::Connecting;
                let url = self.server_url_input.clone();
                let token = self.auth_token_input.clone();

                return cosmic::task::future(async move {
                    let result = helpers::test_connection(&url, &token).await;
                    cosmic::Action::App(Message::ConnectionResult(result))
                });
            }

            Message::ConnectionResult(result) => match result {
                Ok(()) => {
                    self.connection_status = ConnectionStatus::Connected;
                    return self.update(Message::AddNotification(
                        NotificationLevel::Success,
                        fl!("status-connected"),
                        String::new(),
                    ));
                }
                Err(e) => {
                    self.connection_status = ConnectionStatus::Error(e.clone());
                    return self.update(Message::AddNotification(
                        NotificationLevel::Error,
                        fl!("status-error"),
                        e,
                    ));
                }
            },

            Message::FetchJobs => {
                let url = self.config.server_url.clone();
                let token = self.config.auth_token.clone();

                return cosmic::task::future(async move {
                    let result = helpers::fetch_jobs(&url, &token).await;
                    cosmic::Action::App(Message::JobsLoaded(result))
                });
            }

            Message::JobsLoaded(result) => match result {
                Ok(jobs) => {
                    let selected_id = self.pipeline.selected_job_id();
                    self.job_names = std::iter::once(fl!("all-jobs"))
                        .chain(jobs.iter().map(pages::board::job_label))
                        .collect();
                    self.pipeline.selected_job =
                        selected_id.and_then(|id| jobs.iter().position(|job| job.id == id));
                    self.pipeline.jobs = jobs;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to load jobs");
                }
            },

            Message::SelectJob(index) => {
                let selected = pages::board::job_index(index)
                    .filter(|&index| index < self.pipeline.jobs.len());
                if selected != self.pipeline.selected_job {
                    self.pipeline.selected_job = selected;
                    return Task::batch(vec![self.update_title(), self.update(Message::FetchBoard)]);
                }
            }

            Message::FetchBoard => {
                self.pipeline.loading = true;
                self.pipeline.gesture.cancel();
                self.connection_status = ConnectionStatus::Connecting;
                let url = self.config.server_url.clone();
                let token = self.config.auth_token.clone();
                let job_id = self.pipeline.selected_job_id();

                return cosmic::task::future(async move {
                    let result = helpers::fetch_board(&url, &token, job_id).await;
                    cosmic::Action::App(Message::BoardLoaded { job_id, result })
                });
            }

            Message::BoardLoaded { job_id, result } => {
                if job_id != self.pipeline.selected_job_id() {
                    tracing::debug!(?job_id, "ignoring board for a previous job filter");
                    return Task::none();
                }

                match result {
                    Ok(snapshot) => {
                        self.pipeline.load(snapshot.stages, snapshot.applications);
                        self.connection_status = ConnectionStatus::Connected;
                        if self.pipeline.board.is_empty() {
                            tracing::info!(?job_id, "board loaded without applications");
                        }

                        let selection_gone = self
                            .pipeline
                            .selected_application
                            .as_ref()
                            .is_some_and(|id| self.pipeline.board.item(id).is_none());
                        if selection_gone {
                            self.pipeline.selected_application = None;
                        }
                    }
                    Err(e) => {
                        self.pipeline.loading = false;
                        self.connection_status = ConnectionStatus::Error(e.clone());
                        return self.update(Message::AddNotification(
                            NotificationLevel::Error,
                            fl!("board-load-failed"),
                            e,
                        ));
                    }
                }
            }

            Message::Kanban(message) => {
                if let Some(event) = self.pipeline.gesture.update(message) {
                    return self.handle_kanban_event(event);
                }
            }

            Message::MovePersisted { item_id, result } => match result {
                Ok(application) => {
                    if let Err(err) = self.pipeline.confirm_move(&item_id, application) {
                        tracing::warn!(item = %item_id, %err, "confirmed move no longer fits the board");
                        return self.update(Message::FetchBoard);
                    }
                }
                Err(e) => {
                    tracing::warn!(item = %item_id, error = %e, "stage update rejected");
                    let reload = match self.pipeline.rollback_move(&item_id) {
                        Ok(_) => false,
                        Err(err) => {
                            tracing::warn!(item = %item_id, %err, "rollback failed, reloading board");
                            true
                        }
                    };

                    let notify = self.update(Message::AddNotification(
                        NotificationLevel::Error,
                        fl!("move-failed"),
                        e,
                    ));
                    if reload {
                        return Task::batch(vec![notify, self.update(Message::FetchBoard)]);
                    }
                    return notify;
                }
            },

            // Notifications
            Message::AddNotification(level, title, message) => {
                self.notification_id_counter += 1;
                self.notifications.push(Notification {
                    id: self.notification_id_counter,
                    level,
                    title,
                    message,
                });
            }

            Message::DismissNotification(id) => {
                self.notifications.retain(|n| n.id != id);
            }

            Message::CopyNotification(id) => {
                if let Some(notification) = self.notifications.iter().find(|n| n.id == id) {
                    let text = format!("{}: {}", notification.title, notification.message);
                    return copy_to_clipboard(text, fl!("notification-copied"));
                }
            }
        }
        Task::none()
    }

    /// Called when a nav item is selected.
    fn on_nav_select(&mut self, id: nav_bar::Id) -> Task<cosmic::Action<Self::Message>> {
        self.nav.activate(id);
        self.update_title()
    }
}

impl AppModel {
    /// Updates the header and window titles.
    pub fn update_title(&mut self) -> Task<cosmic::Action<Message>> {
        let mut window_title = fl!("app-title");

        if let Some(page) = self.nav.text(self.nav.active()) {
            window_title.push_str(" — ");
            window_title.push_str(page);
        }

        if let Some(job) = self.pipeline.selected_job_title() {
            window_title.push_str(" — ");
            window_title.push_str(job);
        }

        if let Some(id) = self.core.main_window_id() {
            self.set_window_title(window_title, id)
        } else {
            Task::none()
        }
    }

    /// Writes the current config, reporting failures as a notification.
    fn write_config(&mut self) -> Task<cosmic::Action<Message>> {
        let Some(ref context) = self.config_context else {
            return Task::none();
        };

        match self.config.write_entry(context) {
            Ok(()) => {
                self.settings_status = SettingsStatus::Saved;
                Task::none()
            }
            Err(e) => {
                tracing::error!(%e, "failed to save config");
                self.settings_status = SettingsStatus::Error(format!("Failed to save: {}", e));
                self.update(Message::AddNotification(
                    NotificationLevel::Error,
                    fl!("error"),
                    format!("Failed to save: {}", e),
                ))
            }
        }
    }

    /// Handles board events produced by the drag gesture.
    fn handle_kanban_event(&mut self, event: KanbanEvent) -> Task<cosmic::Action<Message>> {
        match event {
            KanbanEvent::Move(command) => self.start_move(command),

            KanbanEvent::Activate(item_id) => {
                self.pipeline.selected_application = Some(item_id);
                self.context_page = ContextPage::ApplicationDetails;
                self.core.window.show_context = true;
                Task::none()
            }

            KanbanEvent::HeaderClicked(column) => {
                self.context_page = ContextPage::StageSummary(column);
                self.core.window.show_context = true;
                Task::none()
            }

            KanbanEvent::HeaderAction(column) => {
                let emails = self.pipeline.candidate_emails(&column);
                if emails.is_empty() {
                    return self.update(Message::AddNotification(
                        NotificationLevel::Info,
                        fl!("no-emails"),
                        String::new(),
                    ));
                }
                copy_to_clipboard(emails, fl!("emails-copied"))
            }
        }
    }

    /// Records a move on the board and sends it to the server.
    fn start_move(&mut self, command: MoveCommand) -> Task<cosmic::Action<Message>> {
        tracing::info!(
            item = %command.item_id,
            from = %command.from_column,
            to = %command.to_column,
            stage_change = command.changes_column(),
            "moving application"
        );

        match self
            .pipeline
            .begin_move(command, self.config.optimistic_moves)
        {
            Ok(change) => {
                let url = self.config.server_url.clone();
                let token = self.config.auth_token.clone();

                cosmic::task::future(async move {
                    let result = helpers::persist_move(
                        &url,
                        &token,
                        change.application_id,
                        &change.stage,
                        change.position,
                    )
                    .await;
                    cosmic::Action::App(Message::MovePersisted {
                        item_id: change.item_id,
                        result,
                    })
                })
            }
            Err(err) => {
                tracing::warn!(%err, "move refused");
                self.update(Message::AddNotification(
                    NotificationLevel::Warning,
                    fl!("move-refused"),
                    err.to_string(),
                ))
            }
        }
    }
}

/// Copies `text` to the clipboard and confirms with a notification titled `done`.
fn copy_to_clipboard(text: String, done: String) -> Task<cosmic::Action<Message>> {
    cosmic::task::future(async move {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => cosmic::Action::App(Message::AddNotification(
                NotificationLevel::Success,
                done,
                String::new(),
            )),
            Err(err) => cosmic::Action::App(Message::AddNotification(
                NotificationLevel::Error,
                fl!("error"),
                err.to_string(),
            )),
        }
    })
}

/// The page to display in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Board,
    Settings,
}

/// The context page to display in the context drawer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
    ApplicationDetails,
    StageSummary(ColumnId),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuAction {
    About,
}

impl menu::action::MenuAction for MenuAction {
    type Message = Message;

    fn message(&self) -> Self::Message {
        match self {
            MenuAction::About => Message::ToggleContextPage(ContextPage::About),
        }
    }
}
