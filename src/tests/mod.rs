mod helpers;
mod memo;
