// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::sync::Mutex;

use logfacade_bridge_log::LogCrateLogger;
use logfacade_core::Error;
use logfacade_core::Level;
use logfacade_core::LevelOverride;
use logfacade_core::Logger;
use logfacade_core::record::Record;

#[derive(Debug, Default)]
struct Capture {
    level: LevelOverride,
    lines: Mutex<Vec<String>>,
}

impl Capture {
    fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }
}

impl Logger for Capture {
    fn set_level(&self, level: Level) {
        self.level.set(level);
    }

    fn level(&self) -> Option<Level> {
        Some(self.level.effective())
    }

    fn reset_level(&self) {
        self.level.reset();
    }

    fn emit(&self, record: &Record) -> Result<(), Error> {
        let line = format!(
            "{} {} {} {}",
            record.level().tag(),
            record.target().unwrap_or_default(),
            record.filename(),
            record.payload()
        );
        self.lines.lock().unwrap().push(line);
        Ok(())
    }
}

#[test]
fn log_macros_reach_the_global_logger() {
    logfacade_bridge_log::setup_log_crate();
    assert!(logfacade_bridge_log::try_setup_log_crate().is_err());

    // nothing installed yet: forwarded to the no-op logger
    log::error!("dropped");

    let capture = Arc::new(Capture::default());
    logfacade_core::set_logger(capture.clone());
    logfacade_core::set_global_level(Level::Info);

    log::debug!(target: "app::db", "hidden");
    log::info!(target: "app::db", "pool ready with {} connections", 8);
    log::warn!(target: "app::http", "slow request");
    assert_eq!(
        capture.take(),
        vec![
            "INF app::db log_to_facade.rs pool ready with 8 connections",
            "WRN app::http log_to_facade.rs slow request",
        ]
    );

    capture.set_level(Level::Trace);
    log::trace!(target: "app", "visible now");
    assert_eq!(capture.take(), vec!["TRC app log_to_facade.rs visible now"]);

    // a facade logger that forwards back into the log crate must not loop
    let wrapper = Arc::new(LogCrateLogger::new("wrapper"));
    wrapper.set_level(Level::Trace);
    logfacade_core::set_logger(wrapper.clone());
    log::info!("comes back once and is dropped");
    wrapper.warn(&[&"also terminates"]);
    log::logger().flush();

    logfacade_core::set_logger(capture.clone());
    log::error!(target: "app", "forwarding restored");
    assert_eq!(capture.take(), vec!["ERR app log_to_facade.rs forwarding restored"]);
}
