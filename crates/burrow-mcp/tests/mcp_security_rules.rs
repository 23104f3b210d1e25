//! パス検証の共通ルール (ワークスペース外, .git, .gitignore, symlink)

use burrow_core::Workspace;
use burrow_mcp::context::McpContext;
use burrow_mcp::errors::SANDBOX_ADVISORY;
use burrow_mcp::handlers::fs::{FsTool, GlobArgs, LsArgs, ReadFilesArgs, TreeArgs};
use burrow_mcp::server::BurrowServer;
use burrow_testkit::WorkspaceFixture;

fn server_for(ws: &WorkspaceFixture) -> BurrowServer {
    let workspace = Workspace::open(ws.root()).unwrap();
    BurrowServer::new(McpContext::with_defaults(workspace))
}

fn read_args(file: &str) -> ReadFilesArgs {
    ReadFilesArgs {
        files: vec![file.to_string()],
        include_line_numbers: false,
        max_lines_per_file: None,
        encoding: None,
    }
}

fn tree_args(path: &str) -> TreeArgs {
    TreeArgs {
        path: Some(path.to_string()),
        max_depth: None,
        include_files: true,
        max_entries: None,
    }
}

#[tokio::test]
async fn test_parent_directory_traversal_blocked() {
    let ws = WorkspaceFixture::new();
    ws.file("notes.txt", "ok");
    let server = server_for(&ws);

    let err = FsTool::read_files(&server, read_args("../notes.txt"))
        .await
        .unwrap_err();
    assert_eq!(err.message, SANDBOX_ADVISORY);

    let err = FsTool::tree(&server, tree_args("..")).await.unwrap_err();
    assert_eq!(err.message, SANDBOX_ADVISORY);
}

#[tokio::test]
async fn test_absolute_path_outside_blocked() {
    let ws = WorkspaceFixture::new();
    let server = server_for(&ws);
    let outside = ws.root().parent().unwrap().to_string_lossy().into_owned();

    let err = FsTool::read_files(&server, read_args(&outside))
        .await
        .unwrap_err();
    assert_eq!(err.message, SANDBOX_ADVISORY);
    assert!(!err.message.contains(&outside));
}

#[tokio::test]
async fn test_absolute_path_inside_allowed() {
    let ws = WorkspaceFixture::new();
    ws.file("notes.txt", "ok");
    let server = server_for(&ws);
    let inside = ws.path("notes.txt").to_string_lossy().into_owned();

    let res = FsTool::read_files(&server, read_args(&inside)).await.unwrap();
    assert_eq!(res.content[0].as_text().unwrap().text, "ok");
}

#[tokio::test]
async fn test_git_directory_is_invisible() {
    let ws = WorkspaceFixture::new();
    ws.file(".git/HEAD", "ref: refs/heads/main\n")
        .file("src/lib.rs", "");
    let server = server_for(&ws);

    let err = FsTool::read_files(&server, read_args(".git/HEAD"))
        .await
        .unwrap_err();
    assert_eq!(err.message, SANDBOX_ADVISORY);

    let args = LsArgs {
        path: Some(".git".to_string()),
        show_hidden: true,
        ..Default::default()
    };
    let res = FsTool::ls(&server, args).await.unwrap();
    assert_eq!(res.content[0].as_text().unwrap().text, "[]");

    let args = LsArgs {
        show_hidden: true,
        ..Default::default()
    };
    let res = FsTool::ls(&server, args).await.unwrap();
    assert_eq!(res.content[0].as_text().unwrap().text, "[\"src\"]");
}

#[tokio::test]
async fn test_gitignore_applies_to_every_tool() {
    let ws = WorkspaceFixture::new();
    ws.gitignore("", "secrets/\n")
        .file("secrets/key.pem", "-----BEGIN-----")
        .file("public.txt", "hi");
    let server = server_for(&ws);

    let err = FsTool::read_files(&server, read_args("secrets/key.pem"))
        .await
        .unwrap_err();
    assert_eq!(err.message, SANDBOX_ADVISORY);

    let err = FsTool::tree(&server, tree_args("secrets")).await.unwrap_err();
    assert_eq!(err.message, SANDBOX_ADVISORY);

    let args = GlobArgs {
        pattern: "**/*".to_string(),
        ..Default::default()
    };
    let res = FsTool::glob(&server, args).await.unwrap();
    assert_eq!(res.content[0].as_text().unwrap().text, "[\"public.txt\"]");
}

#[cfg(unix)]
#[tokio::test]
async fn test_symlink_outside_root_blocked() {
    let outside = WorkspaceFixture::new();
    outside.file("secret.txt", "secret");
    let ws = WorkspaceFixture::new();
    ws.symlink(outside.path("secret.txt"), "link.txt");
    let server = server_for(&ws);

    let err = FsTool::read_files(&server, read_args("link.txt"))
        .await
        .unwrap_err();
    assert_eq!(err.message, SANDBOX_ADVISORY);
}
