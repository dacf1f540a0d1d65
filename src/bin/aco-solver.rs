use relief_aco::solver::aco::search;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    search::run()
}
