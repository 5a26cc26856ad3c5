use std::sync::Arc;

use sortvisor::{
    Config, LogWriter, RuntimeError, Subscribe, Supervisor, dataset, sorters, verify::SortReport,
};

const DATASET_SIZE: usize = 1000;

#[tokio::main]
async fn main() -> Result<(), RuntimeError> {
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let sup = Supervisor::builder(Config::default())
        .with_subscribers(subs)
        .build();

    let data = dataset::shuffled(DATASET_SIZE);
    match sup.run(&data, sorters::all()).await {
        Ok(outcomes) => {
            for outcome in &outcomes {
                print!("{}", SortReport::new(&outcome.name, &outcome.data));
            }
        }
        Err(err @ RuntimeError::Canceled { .. }) => return Err(err),
        Err(err) => eprintln!("run failed: {}", err.as_message()),
    }

    println!("program complete");
    Ok(())
}
