/// Built-in rollback advice for well-known dangerous command shapes.
///
/// Used by panic mode when no language model is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RollbackHint {
    GitPush,
    DockerDeploy,
    Kubernetes,
    NpmPublish,
    Migration,
    Unknown,
}

impl RollbackHint {
    /// Pick the hint for `command`; the first matching pattern wins
    pub fn for_command(command: &str) -> Self {
        let cmd = command.to_lowercase();

        if cmd.contains("git push") {
            RollbackHint::GitPush
        } else if cmd.contains("docker") && cmd.contains("deploy") {
            RollbackHint::DockerDeploy
        } else if cmd.contains("kubectl") {
            RollbackHint::Kubernetes
        } else if cmd.contains("npm") && cmd.contains("publish") {
            RollbackHint::NpmPublish
        } else if cmd.contains("migrate") {
            RollbackHint::Migration
        } else {
            RollbackHint::Unknown
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            RollbackHint::GitPush => "Git Push Rollback",
            RollbackHint::DockerDeploy => "Docker Deploy Rollback",
            RollbackHint::Kubernetes => "Kubernetes Rollback",
            RollbackHint::NpmPublish => "NPM Publish Rollback",
            RollbackHint::Migration => "Database Migration Rollback",
            RollbackHint::Unknown => "No specific rollback pattern found",
        }
    }

    pub fn steps(&self) -> &'static [&'static str] {
        match self {
            RollbackHint::GitPush => &[
                "git revert HEAD",
                "git push origin <branch>",
                "Or: git reset --hard HEAD~1 && git push --force (dangerous!)",
            ],
            RollbackHint::DockerDeploy => &[
                "docker ps -a  # find the container ID",
                "docker stop <container-id>",
                "docker start <previous-container-id>",
            ],
            RollbackHint::Kubernetes => &[
                "kubectl rollout undo deployment/<name>",
                "kubectl rollout status deployment/<name>",
            ],
            RollbackHint::NpmPublish => &[
                "npm unpublish <package>@<version>",
                "(only works within 72 hours of publishing)",
            ],
            RollbackHint::Migration => &[
                "Check your migration tool's documentation",
                "Common: npm run migrate:down or rake db:rollback",
            ],
            RollbackHint::Unknown => &["Configure an API key and run 'devkit panic' for AI-powered suggestions"],
        }
    }
}
