// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn blob_name_joins_date_session_filename() {
    let item = WorkItem {
        source_path: PathBuf::from("/mnt/nfs/incoming/alpha/x.bin"),
        session_name: "alpha".to_string(),
        date_prefix: "20260305".to_string(),
        filename: "x.bin".to_string(),
        from_recovery: false,
    };
    assert_eq!(item.blob_name(), "20260305/alpha/x.bin");
}
