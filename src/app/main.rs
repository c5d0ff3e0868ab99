use std::{env, path::Path, process};

// Declare modules located within the src/app/ directory
mod constants;
mod emulator;

use emulator::Emulator;
use mochi::instruction::OpcodeTable;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} list", program);
    eprintln!("       {} disasm <program_path>", program);
    eprintln!("       {} run <program_path> [steps]", program);
    process::exit(1);
}

fn main() -> Result<(), String> {
    // --- Argument Parsing ---
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("mochi_app");
    let Some(command) = args.get(1) else {
        usage(program);
    };

    match command.as_str() {
        "list" => {
            let table = OpcodeTable::build();
            for opcode in table.iter() {
                println!("{} ({} bytes)", opcode.debug_string(), opcode.length());
            }
            println!("{} opcodes", table.len());
        }
        "disasm" => {
            let Some(path) = args.get(2) else {
                usage(program);
            };
            let emulator = Emulator::new(Path::new(path))?;
            for (address, text) in emulator.disassemble_program()? {
                println!("{}  {}", address, text);
            }
        }
        "run" => {
            let Some(path) = args.get(2) else {
                usage(program);
            };
            let max_steps = match args.get(3) {
                Some(steps) => steps
                    .parse::<usize>()
                    .map_err(|e| format!("Invalid step count '{}': {}", steps, e))?,
                None => constants::DEFAULT_MAX_STEPS,
            };

            // --- Setup Emulator ---
            let mut emulator = Emulator::new(Path::new(path))?;
            println!("Loaded {} bytes, running up to {} steps...", emulator.program_size, max_steps);

            let executed = emulator.run(max_steps)?;
            println!("Executed {} instructions in {} cycles.", executed, emulator.cpu.total_cycles());
            println!("{}", emulator.cpu.registers());
        }
        _ => usage(program),
    }
    Ok(())
}
