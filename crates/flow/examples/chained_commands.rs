// Ejemplo: dos comandos encadenados sobre un backend de directorio.
//
// `Split` compromete cada palabra con su propio token; `Join` lee esas
// referencias por token y compromete el resultado. Al terminar se listan
// los archivos generados.
use async_trait::async_trait;
use flow::{Command, CommandOutput, DirectoryFlow, Flow, FlowError, Result, TimestampNameDecorator, TokenDecorator};

struct Split;

#[async_trait]
impl Command for Split {
    fn name(&self) -> &str {
        "split"
    }

    async fn execute(&self, _context: &dyn Flow, args: &[String]) -> Result<Vec<CommandOutput>> {
        Ok(args.iter()
               .enumerate()
               .map(|(i, word)| {
                   CommandOutput::new(word.clone()).decorated(TokenDecorator::new(format!("word{}", i)))
                                                   .decorated(TimestampNameDecorator::new("txt"))
               })
               .collect())
    }
}

struct Join {
    count: usize,
}

#[async_trait]
impl Command for Join {
    fn name(&self) -> &str {
        "join"
    }

    async fn execute(&self, context: &dyn Flow, _args: &[String]) -> Result<Vec<CommandOutput>> {
        let mut words = Vec::with_capacity(self.count);
        for i in 0..self.count {
            let token = format!("word{}", i);
            words.push(context.token(&token).ok_or(FlowError::NotFound(token))?);
        }
        Ok(vec![CommandOutput::new(words.join("-")).decorated(TokenDecorator::new("joined"))
                                                   .decorated(TimestampNameDecorator::new("txt"))])
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let dir = std::env::temp_dir().join(format!("flow-demo-{}", flow::Uuid::new_v4()));
    let flow = DirectoryFlow::create(&dir, "txt").await?;

    let words: Vec<String> = ["hola", "mundo", "flow"].iter().map(|s| s.to_string()).collect();
    let refs = flow.run(&Split, &words).await?;
    println!("{} palabras comprometidas", refs.len());

    flow.run(&Join { count: words.len() }, &[]).await?;
    println!("joined = {:?}", flow.token("joined"));

    let mut entries = tokio::fs::read_dir(flow.root()).await
                                                      .map_err(|e| FlowError::storage(dir.display().to_string(), e))?;
    while let Ok(Some(entry)) = entries.next_entry().await {
        println!("  {}", entry.file_name().to_string_lossy());
    }
    Ok(())
}
