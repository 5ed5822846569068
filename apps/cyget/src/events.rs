//! Event handling and progress display

use console::Style;
use cyget_events::{AppEvent, CatalogEvent, DownloadEvent, GeneralEvent, ResolverEvent};

/// Turns events into status lines on stderr
pub struct EventHandler {
    colors_enabled: bool,
    debug_enabled: bool,
}

impl EventHandler {
    pub fn new(colors_enabled: bool, debug_enabled: bool) -> Self {
        Self {
            colors_enabled,
            debug_enabled,
        }
    }

    /// Handle incoming event
    pub fn handle_event(&mut self, event: &AppEvent) {
        crate::logging::log_event_with_tracing(event);

        if let Some(line) = self.render(event) {
            eprintln!("{line}");
        }
    }

    /// Status line for `event`, if it is shown at the current verbosity
    fn render(&self, event: &AppEvent) -> Option<String> {
        match event {
            AppEvent::Download(download) => self.render_download(download),
            AppEvent::Catalog(CatalogEvent::Refreshing { url, .. }) => {
                Some(format!("Downloading setup.ini from {url} ..."))
            }
            AppEvent::General(GeneralEvent::Warning { message, context }) => {
                let mut line = format!("{} {message}", self.paint(&self.warn_style(), "Warning:"));
                if let Some(context) = context {
                    line.push_str(&format!(" ({context})"));
                }
                Some(line)
            }
            _ if self.debug_enabled => Some(Self::render_debug(event)),
            _ => None,
        }
    }

    fn render_download(&self, event: &DownloadEvent) -> Option<String> {
        match event {
            DownloadEvent::Started { file_name, .. } => Some(format!("Downloading {file_name} ...")),
            DownloadEvent::CacheHit { file_name, .. } => Some(format!(
                "\"{file_name}\" already exists, {}",
                self.paint(&self.ok_style(), "PASS!")
            )),
            DownloadEvent::VerifyFailed { package, .. } => Some(
                self.paint(&self.error_style(), &format!("Verify package {package} failed")),
            ),
            DownloadEvent::Failed {
                package,
                url,
                error,
            } => Some(self.paint(
                &self.error_style(),
                &format!("Download of {package} from {url} failed: {error}"),
            )),
            DownloadEvent::NoBinary { package, spec } if self.debug_enabled => {
                Some(format!("{package} has no binary artifact for '{spec}', skipping"))
            }
            DownloadEvent::Completed { path, size, .. } if self.debug_enabled => {
                Some(format!("Saved {} ({size} bytes)", path.display()))
            }
            _ => None,
        }
    }

    fn render_debug(event: &AppEvent) -> String {
        match event {
            AppEvent::Catalog(CatalogEvent::Loaded { path, packages }) => {
                format!("[debug] loaded {packages} packages from {}", path.display())
            }
            AppEvent::Resolver(ResolverEvent::Started { requested }) => {
                format!("[debug] resolving {requested} requested names")
            }
            AppEvent::Resolver(ResolverEvent::UnknownReference { token }) => {
                format!("[debug] '{token}' is not in the catalog")
            }
            AppEvent::Resolver(ResolverEvent::Completed { packages }) => {
                format!("[debug] resolved {packages} packages")
            }
            AppEvent::General(GeneralEvent::DebugLog { message, .. }) => format!("[debug] {message}"),
            AppEvent::General(GeneralEvent::OperationStarted { operation }) => {
                format!("[debug] {operation} started")
            }
            AppEvent::General(GeneralEvent::OperationCompleted { operation, success }) => {
                format!("[debug] {operation} finished (success: {success})")
            }
            other => format!("[debug] {other:?}"),
        }
    }

    fn ok_style(&self) -> Style {
        Style::new().green().bold().force_styling(self.colors_enabled)
    }

    fn warn_style(&self) -> Style {
        Style::new().yellow().bold().force_styling(self.colors_enabled)
    }

    fn error_style(&self) -> Style {
        Style::new().red().force_styling(self.colors_enabled)
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        if self.colors_enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
