use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::StatusInfo;
use colored::Colorize;

impl Repository {
    pub fn status(&self) -> anyhow::Result<()> {
        self.open()?;

        let (_, head) = self.head_commit()?;
        let current_branch = self.refs().current_branch()?;
        let workspace_files = self.workspace().scan()?;
        let status = StatusInfo::compute(head.tree(), self.index().staging(), &workspace_files);

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch in self.refs().list_branches()? {
            if branch == current_branch {
                writeln!(writer, "{}", format!("*{branch}").green())?;
            } else {
                writeln!(writer, "{branch}")?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for path in &status.staged {
            writeln!(writer, "{path}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for path in &status.removed {
            writeln!(writer, "{path}")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        for (path, change) in &status.workspace_changeset {
            writeln!(writer, "{path} ({change})")?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for path in &status.untracked {
            writeln!(writer, "{path}")?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
