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

use std::fs;
use std::sync::Arc;

use logfacade_adapter_stream::StreamLogger;
use logfacade_core::ErrorKind;
use logfacade_core::Level;
use logfacade_core::Logger;
use logfacade_core::registry::LevelRegistry;

fn tags_and_messages(contents: &str) -> Vec<&str> {
    contents
        .lines()
        .map(|line| line.split_once(' ').unwrap().1)
        .collect()
}

#[test]
fn appends_to_file_and_keeps_existing_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("service.log");
    fs::write(&path, "previous run\n").unwrap();

    let registry = LevelRegistry::with_level(Level::Debug);
    let logger: Arc<dyn Logger> = Arc::new(
        StreamLogger::file(&path)
            .unwrap()
            .level_registry(registry)
            .no_caller(),
    );
    logger.trace(&[&"hidden"]);
    logger.debug(&[&"cache", &"warm"]);
    logger.warn_fmt(format_args!("{} of {} shards", 3, 4));
    logger.flush().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let (first, rest) = contents.split_once('\n').unwrap();
    assert_eq!(first, "previous run");
    assert_eq!(
        tags_and_messages(rest),
        vec!["[DBG] cache warm", "[WRN] 3 of 4 shards"]
    );
}

#[test]
fn caller_suffix_points_at_call_site() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("caller.log");

    let logger = StreamLogger::file(&path)
        .unwrap()
        .level_registry(LevelRegistry::with_level(Level::Info));
    let line = line!() + 1;
    logger.info(&[&"here"]);
    drop(logger);

    let contents = fs::read_to_string(&path).unwrap();
    let expected = format!("[INF] here (file_destination.rs:{line})");
    assert_eq!(tags_and_messages(&contents), vec![expected.as_str()]);
}

#[test]
fn unopenable_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("app.log");

    let err = StreamLogger::file(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(err.to_string().contains("app.log"), "{err}");
}
