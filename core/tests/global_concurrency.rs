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
use std::thread;

use logfacade_core::Level;
use logfacade_core::Logger;
use logfacade_core::NoOpLogger;
use logfacade_core::TestingLogger;
use logfacade_core::registry::LevelRegistry;

#[test]
fn concurrent_setters_and_getters_never_tear() {
    let written = [Level::Info, Level::Warn, Level::Error];
    let silent = LevelRegistry::with_level(Level::Off);
    let loggers: Vec<Arc<dyn Logger>> = vec![
        Arc::new(NoOpLogger::default()),
        Arc::new(TestingLogger::with_registry(silent.clone())),
        Arc::new(TestingLogger::with_registry(silent.clone())),
    ];

    logfacade_core::set_global_level(written[0]);
    logfacade_core::set_logger(loggers[0].clone());

    thread::scope(|s| {
        for i in 0..16usize {
            let loggers = &loggers;
            s.spawn(move || {
                for j in 0..2000usize {
                    let pick = (i * 7 + j) % written.len();
                    match (i + j) % 4 {
                        0 => logfacade_core::set_global_level(written[pick]),
                        1 => {
                            let level = logfacade_core::global_level();
                            assert!(written.contains(&level), "unexpected level {level}");
                        }
                        2 => {
                            logfacade_core::set_logger(loggers[pick].clone());
                        }
                        _ => {
                            let current = logfacade_core::logger();
                            assert!(loggers.iter().any(|l| Arc::ptr_eq(l, &current)));
                            current.info(&[&"concurrent", &j]);
                        }
                    }
                }
            });
        }
    });

    assert!(written.contains(&logfacade_core::global_level()));
}
