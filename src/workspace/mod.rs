pub mod project;

pub use project::{
    find_project_root, init_project_workspace, load_project_config, project_context, project_name,
    ProjectConfig, ProjectSettings, ProjectType, WorkspaceError, WORKSPACE_DIR,
};
