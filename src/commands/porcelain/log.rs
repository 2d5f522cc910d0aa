use crate::areas::repository::Repository;
use crate::artifacts::database::store::CommitStore;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use colored::Colorize;

impl Repository {
    /// History of HEAD along first parents
    pub fn log(&self) -> anyhow::Result<()> {
        self.open()?;

        let mut current_oid = Some(self.refs().read_head()?);

        while let Some(commit_oid) = current_oid {
            let commit = self.database().get_commit(&commit_oid)?;
            self.show_commit(&commit_oid, &commit)?;

            current_oid = commit.parent().cloned();
        }

        Ok(())
    }

    /// Every commit in the store, in id order
    pub fn global_log(&self) -> anyhow::Result<()> {
        self.open()?;

        for commit_oid in self.database().list_commit_ids()? {
            let commit = self.database().get_commit(&commit_oid)?;
            self.show_commit(&commit_oid, &commit)?;
        }

        Ok(())
    }

    fn show_commit(&self, commit_oid: &ObjectId, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();

        writeln!(writer, "===")?;
        writeln!(writer, "commit {}", commit_oid.as_ref().yellow())?;
        if let (Some(parent), Some(second_parent)) = (commit.parent(), commit.second_parent()) {
            writeln!(
                writer,
                "Merge: {} {}",
                parent.to_short_oid(),
                second_parent.to_short_oid()
            )?;
        }
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;

        Ok(())
    }
}
