//! Dropload - Frontend Rust/Leptos Application
//!
//! A WebAssembly upload widget: drop or pick files, upload them all at once
//! and follow each file's progress.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  UploadWidget                                                │
//! │  ├── Drop zone + hidden file input                          │
//! │  ├── Upload / Add More Files / Clear Selection              │
//! │  ├── Status message                                         │
//! │  └── ProgressList                                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! State, dispatching and labels come from the `dropload` core crate; this
//! crate only renders them and talks to the browser.
//!
//! # Modules
//!
//! - [`types`] - Browser aliases (WidgetState, BrowserFile)
//! - [`components`] - UI components (UploadWidget, ProgressList)
//! - [`services`] - XMLHttpRequest upload transport

use leptos::*;
use leptos_meta::{provide_meta_context, Title};

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod types;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

// Configuration
pub use config::*;

// Types
pub use types::{files_from_list, BrowserFile, WidgetEvent, WidgetState};

// Components
pub use components::*;

// Services
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text=APP_TITLE/>
        <main class="container">
            <UploadWidget/>
        </main>
    }
}
