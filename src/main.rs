// SPDX-License-Identifier: MPL-2.0
use picdate::app::App;
use picdate::{config, event};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::window::WindowBuilder;
use tracing_subscriber::EnvFilter;
use wry::WebViewBuilder;

enum UserEvent {
    Intent(event::Intent),
}

fn main() -> wry::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = pico_args::Arguments::from_env();
    let tool_override: Option<String> = args.opt_value_from_str("--tool").unwrap_or(None);
    let start_override = args
        .finish()
        .into_iter()
        .next()
        .and_then(|s| s.into_string().ok());

    let mut cfg = config::load().unwrap_or_default();
    if tool_override.is_some() {
        cfg.tool_program = tool_override;
    }
    if start_override.is_some() {
        cfg.start_path = start_override;
    }

    let mut app = App::new(&cfg);
    let initial_html = app.render();

    let event_loop = EventLoopBuilder::<UserEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();
    let window = WindowBuilder::new()
        .with_title("picdate")
        .with_inner_size(tao::dpi::LogicalSize::new(1000.0, 768.0))
        .build(&event_loop)
        .expect("failed to create window");

    let builder = WebViewBuilder::new()
        .with_html(initial_html)
        .with_ipc_handler(move |request| {
            // Garbled messages are dropped; only well-formed intents reach
            // the controller.
            if let Some(intent) = event::decode(request.body()) {
                let _ = proxy.send_event(UserEvent::Intent(intent));
            } else {
                tracing::warn!(message = %request.body(), "ignoring malformed ipc message");
            }
        });

    #[cfg(not(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
    )))]
    let webview = builder.build(&window)?;
    #[cfg(any(
        target_os = "linux",
        target_os = "dragonfly",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
    ))]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().expect("failed to get window vbox");
        builder.build_gtk(vbox)?
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => *control_flow = ControlFlow::Exit,
            Event::UserEvent(UserEvent::Intent(intent)) => {
                // One intent is fully processed, then the view is replaced.
                let html = app.handle(intent);
                if let Err(err) = webview.load_html(&html) {
                    tracing::warn!(error = %err, "failed to reload view");
                }
            }
            _ => {}
        }
    });
}
