//! エラーコードの対応検証

use burrow_core::Workspace;
use burrow_mcp::context::McpContext;
use burrow_mcp::handlers::fs::{FindArgs, FsTool, ReadFilesArgs, TreeArgs};
use burrow_mcp::rmcp::model::ErrorCode;
use burrow_mcp::server::BurrowServer;
use burrow_testkit::WorkspaceFixture;

fn server_for(ws: &WorkspaceFixture) -> BurrowServer {
    let workspace = Workspace::open(ws.root()).unwrap();
    BurrowServer::new(McpContext::with_defaults(workspace))
}

fn code(err: &burrow_mcp::rmcp::ErrorData) -> String {
    err.data.as_ref().unwrap()["code"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_invalid_parameters() {
    let ws = WorkspaceFixture::new();
    let server = server_for(&ws);

    let err = FsTool::read_files(
        &server,
        ReadFilesArgs {
            files: vec![],
            include_line_numbers: false,
            max_lines_per_file: None,
            encoding: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(code(&err), "INVALID_PARAMETER");
    assert_eq!(err.message, "No files provided");

    let err = FsTool::find(
        &server,
        FindArgs {
            search_text: String::new(),
            file_pattern: None,
            case_sensitive: true,
            whole_word: false,
            max_results: None,
            sort_by: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(code(&err), "INVALID_PARAMETER");
}

#[tokio::test]
async fn test_tree_error_codes() {
    let ws = WorkspaceFixture::new();
    ws.file("file.txt", "x");
    let server = server_for(&ws);
    let tree = |path: &str| TreeArgs {
        path: Some(path.to_string()),
        max_depth: None,
        include_files: true,
        max_entries: None,
    };

    let err = FsTool::tree(&server, tree("missing")).await.unwrap_err();
    assert_eq!(code(&err), "NOT_FOUND");
    assert!(err.message.contains("missing"));

    let err = FsTool::tree(&server, tree("file.txt")).await.unwrap_err();
    assert_eq!(code(&err), "NOT_A_DIRECTORY");

    let err = FsTool::tree(&server, tree("../")).await.unwrap_err();
    assert_eq!(code(&err), "PATH_REJECTED");
}

#[tokio::test]
async fn test_decode_failure() {
    let ws = WorkspaceFixture::new();
    ws.file("blob.bin", [0xffu8, 0xfe, 0xfd]);
    let server = server_for(&ws);

    let err = FsTool::read_files(
        &server,
        ReadFilesArgs {
            files: vec!["blob.bin".to_string()],
            include_line_numbers: false,
            max_lines_per_file: None,
            encoding: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(code(&err), "DECODE_FAILURE");
    assert!(err.message.contains("blob.bin"));
}
